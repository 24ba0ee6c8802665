//! Error types for tetrachord

use std::fmt;

use thiserror::Error;

/// The textual grammar an input failed to match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Syntax {
    NoteName,
    IntervalName,
    RomanNumeral,
    ChordSymbol,
    ModeName,
    ScaleName,
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Syntax::*;

        let name = match *self {
            NoteName => "note name",
            IntervalName => "interval name",
            RomanNumeral => "roman numeral",
            ChordSymbol => "chord symbol",
            ModeName => "mode name",
            ScaleName => "scale name",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid {syntax}: {input:?}")]
    Format { syntax: Syntax, input: String },
    #[error("slash bass must use the same naming as the root: {0:?}")]
    SlashNotation(String),
    #[error("invalid argument: {0}")]
    Argument(String),
    #[error("no known scale matches {0}")]
    UnknownScale(String),
    #[error("invalid chord style: {0}")]
    Style(String),
}

impl Error {
    pub(crate) fn format(syntax: Syntax, input: &str) -> Error {
        Error::Format { syntax, input: input.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
