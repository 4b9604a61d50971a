use ::core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};
use strum_macros::{EnumCount, EnumIter};
use thiserror::Error;

/// What a token is: a whitespace separated word or a single character
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumCount, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TokenMode {
    Word,
    Character,
}

impl TokenMode {
    #[inline]
    pub const fn into_str(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Character => "character",
        }
    }

    /// Name of the reference table file written for this mode
    #[inline]
    pub const fn file_name(self, compressed: bool) -> &'static str {
        match (self, compressed) {
            (Self::Word, false) => "dict_word.json",
            (Self::Word, true) => "dict_word.json.br",
            (Self::Character, false) => "dict_character.json",
            (Self::Character, true) => "dict_character.json.br",
        }
    }
}

impl fmt::Display for TokenMode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.into_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid mode {0:?}, choose either 'word' or 'character'")]
pub struct InvalidModeError(pub String);

impl FromStr for TokenMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "word" => Ok(Self::Word),
            "character" => Ok(Self::Character),
            _ => Err(InvalidModeError(s.to_owned())),
        }
    }
}
