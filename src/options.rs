use std::collections::HashMap;

use log::debug;
use thiserror::Error;

pub const HELP: &str = "help";
pub const COPYRIGHT: &str = "copyright";
pub const LEN: &str = "len";
pub const CLIP: &str = "clip";

/// Two switches, one of which may carry a value.
pub const DEFAULT_MAX_TOKENS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Stops parsing as soon as it is seen (help, copyright).
    Informational,
    /// Consumes the following token as its value.
    Value,
    /// Presence only.
    Flag,
}

#[derive(Debug, Clone)]
pub struct OptionDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    kind: OptionKind,
}

impl OptionDefinition {
    pub const fn new(name: &'static str, aliases: &'static [&'static str], kind: OptionKind) -> Self {
        OptionDefinition { name, aliases, kind }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    fn matches(&self, token: &str) -> bool {
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(token))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("alias {alias:?} is registered for both {first:?} and {second:?}")]
    DuplicateAlias {
        alias: &'static str,
        first: &'static str,
        second: &'static str,
    },
    #[error("option name {0:?} is defined more than once")]
    DuplicateName(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown switch: {0}")]
    UnknownSwitch(String),
    #[error("switch {0} requires a value")]
    MissingValue(String),
    #[error("too many arguments (at most {max} accepted)")]
    TooManyArguments { max: usize },
}

/// Immutable registry of the switches a command line may contain.
#[derive(Debug, Clone)]
pub struct AliasTable {
    definitions: Vec<OptionDefinition>,
    max_tokens: usize,
}

impl AliasTable {
    /// Builds a table, rejecting duplicate names and aliases that collide
    /// when compared without regard to ASCII case.
    pub fn new(definitions: Vec<OptionDefinition>) -> Result<Self, TableError> {
        for (i, def) in definitions.iter().enumerate() {
            for earlier in &definitions[..i] {
                if earlier.name == def.name {
                    return Err(TableError::DuplicateName(def.name));
                }
            }
            for (j, alias) in def.aliases.iter().enumerate() {
                if def.aliases[..j].iter().any(|a| a.eq_ignore_ascii_case(alias)) {
                    return Err(TableError::DuplicateAlias { alias: *alias, first: def.name, second: def.name });
                }
                if let Some(owner) = definitions[..i].iter().find(|d| d.matches(alias)) {
                    return Err(TableError::DuplicateAlias { alias: *alias, first: owner.name, second: def.name });
                }
            }
        }
        Ok(AliasTable { definitions, max_tokens: DEFAULT_MAX_TOKENS })
    }

    /// The switches genkey understands.
    pub fn standard() -> Self {
        AliasTable {
            definitions: vec![
                OptionDefinition::new(HELP, &["-h", "--help", "/help", "/h"], OptionKind::Informational),
                OptionDefinition::new(COPYRIGHT, &["-c", "--copyright", "/copyright", "/c"], OptionKind::Informational),
                OptionDefinition::new(LEN, &["-l", "--len", "/len"], OptionKind::Value),
                OptionDefinition::new(CLIP, &["--clip", "/clip"], OptionKind::Flag),
            ],
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn lookup(&self, token: &str) -> Option<&OptionDefinition> {
        self.definitions.iter().find(|d| d.matches(token))
    }
}

/// Switches seen on the command line, keyed by canonical name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedOptions {
    values: HashMap<&'static str, Option<String>>,
}

impl ParsedOptions {
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// `None` when the switch is absent, `Some(None)` when it was given
    /// without a value.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.values.get(name).map(|v| v.as_deref())
    }

    fn set(&mut self, name: &'static str, value: Option<String>) {
        self.values.insert(name, value);
    }
}

pub fn parse<S: AsRef<str>>(tokens: &[S], table: &AliasTable) -> Result<ParsedOptions, ParseError> {
    let mut parsed = ParsedOptions::default();
    let mut i = 0;
    while i < tokens.len() {
        if i >= table.max_tokens() {
            return Err(ParseError::TooManyArguments { max: table.max_tokens() });
        }
        let token = tokens[i].as_ref();
        let def = table
            .lookup(token)
            .ok_or_else(|| ParseError::UnknownSwitch(token.to_string()))?;
        match def.kind() {
            OptionKind::Informational => {
                debug!("{token} requested, ignoring remaining arguments");
                let mut only = ParsedOptions::default();
                only.set(def.name(), None);
                return Ok(only);
            }
            OptionKind::Value => {
                i += 1;
                if i >= table.max_tokens() && i < tokens.len() {
                    return Err(ParseError::TooManyArguments { max: table.max_tokens() });
                }
                let value = tokens
                    .get(i)
                    .ok_or_else(|| ParseError::MissingValue(token.to_string()))?;
                debug!("{} = {:?}", def.name(), value.as_ref());
                parsed.set(def.name(), Some(value.as_ref().to_string()));
            }
            OptionKind::Flag => {
                debug!("{} set", def.name());
                parsed.set(def.name(), None);
            }
        }
        i += 1;
    }
    Ok(parsed)
}
