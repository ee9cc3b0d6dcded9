use std::num::NonZeroUsize;

use log::debug;
use thiserror::Error;

use crate::options::{ParseError, ParsedOptions, CLIP, COPYRIGHT, HELP, LEN};

pub const DEFAULT_KEY_LEN: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(n) => n,
    None => panic!("default key length must be non-zero"),
};

/// Largest key accepted, 1 MiB. The hex text is twice that.
pub const MAX_KEY_LEN: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Copyright,
    Generate {
        length: NonZeroUsize,
        copy_to_clipboard: bool,
    },
}

/// Anything wrong with what the user typed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("invalid key length: {0:?} (expected a whole number of bytes, 1 to {max})", max = MAX_KEY_LEN)]
    InvalidLength(String),
    #[error("unreadable command line: {0}")]
    Arguments(String),
}

pub fn resolve(opts: &ParsedOptions) -> Result<Command, UsageError> {
    if opts.contains(HELP) {
        return Ok(Command::Help);
    }
    if opts.contains(COPYRIGHT) {
        return Ok(Command::Copyright);
    }
    let length = match opts.get(LEN) {
        None => DEFAULT_KEY_LEN,
        Some(None) => return Err(UsageError::InvalidLength(String::new())),
        Some(Some(value)) => parse_len(value)?,
    };
    let copy_to_clipboard = opts.contains(CLIP);
    debug!("generate {length} bytes, clipboard: {copy_to_clipboard}");
    Ok(Command::Generate { length, copy_to_clipboard })
}

fn parse_len(value: &str) -> Result<NonZeroUsize, UsageError> {
    let invalid = || UsageError::InvalidLength(value.to_string());
    let n: usize = value.trim().parse().map_err(|_| invalid())?;
    if n > MAX_KEY_LEN {
        return Err(invalid());
    }
    NonZeroUsize::new(n).ok_or_else(invalid)
}
