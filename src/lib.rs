use std::ffi::OsString;
use std::io::{self, Write};
use std::iter;

use clap::Parser;
use log::debug;
use thiserror::Error;

pub mod command;
pub mod keygen;
pub mod options;
pub mod output;
pub mod text;

use command::{resolve, Command, UsageError};
use keygen::{generate, EntropyError, HexString};
use options::{parse, AliasTable};
use output::{Clipboard, OutputSink, SystemClipboard};
use text::{print_copyright, print_usage, USAGE};

#[derive(Parser, Debug)]
#[command(name = "genkey", disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// switches: --len LENGTH, --clip, --help, --copyright
    /// (case-insensitive, / prefix also accepted)
    switches: Vec<OsString>,
}

impl Args {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_args_os(std::env::args_os())
    }

    /// Collects every token after the program name verbatim. An escape `--`
    /// is inserted ahead of them so clap never interprets any of them,
    /// including a `--` typed by the user.
    pub fn from_args_os<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::<OsString>::into);
        let bin = args.next().unwrap_or_else(|| OsString::from("genkey"));
        let argv = iter::once(bin).chain(iter::once(OsString::from("--"))).chain(args);
        Self::try_parse_from(argv).map_err(|e| Error::Usage(UsageError::Arguments(format!("{:?}", e.kind()))))
    }

    /// The switches as text. Tokens that are not valid UTF-8 are converted
    /// lossily and so never match an alias.
    pub fn tokens(&self) -> Vec<String> {
        self.switches
            .iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error(transparent)]
    Entropy(#[from] EntropyError),
    #[error("failed to copy key to clipboard: {0:#}")]
    Clipboard(anyhow::Error),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl Error {
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => 1,
            Error::Entropy(_) => 2,
            Error::Clipboard(_) => 3,
            Error::Output(_) => 4,
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Generated(HexString),
    ShowedHelp,
    ShowedCopyright,
}

impl Outcome {
    /// Only a generated key counts as success.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Generated(_) => 0,
            Outcome::ShowedHelp | Outcome::ShowedCopyright => 1,
        }
    }
}

pub struct GenKey<W, E, C> {
    table: AliasTable,
    sink: OutputSink<W, C>,
    err: E,
}

impl<W: Write, E: Write, C: Clipboard> GenKey<W, E, C> {
    pub fn new(table: AliasTable, sink: OutputSink<W, C>, err: E) -> Self {
        GenKey { table, sink, err }
    }

    pub fn run<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<Outcome, Error> {
        let opts = parse(tokens, &self.table).map_err(UsageError::from)?;
        let command = resolve(&opts)?;
        debug!("resolved {command:?}");
        match command {
            Command::Help => {
                print_usage(&mut self.err).map_err(Error::Output)?;
                Ok(Outcome::ShowedHelp)
            }
            Command::Copyright => {
                print_copyright(self.sink.out()).map_err(Error::Output)?;
                Ok(Outcome::ShowedCopyright)
            }
            Command::Generate { length, copy_to_clipboard } => {
                let hex = generate(length)?.to_hex();
                self.sink.emit(&hex, copy_to_clipboard)?;
                Ok(Outcome::Generated(hex))
            }
        }
    }

    pub fn into_parts(self) -> (W, E, C) {
        let (out, clipboard) = self.sink.into_parts();
        (out, self.err, clipboard)
    }
}

pub fn run(args: Args) -> Result<Outcome, Error> {
    let sink = OutputSink::new(io::stdout().lock(), SystemClipboard);
    let mut genkey = GenKey::new(AliasTable::standard(), sink, io::stderr().lock());
    genkey.run(args.tokens().as_slice())
}

/// The stderr text for `e`: `error: ...`, plus the usage text for usage
/// errors.
pub fn report(e: &Error) -> String {
    if e.is_usage() {
        format!("error: {e}\n{USAGE}")
    } else {
        format!("error: {e}\n")
    }
}
