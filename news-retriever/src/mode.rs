//! Answer modes: a named response policy controlling retrieval filtering and
//! generation instructions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::retriever_error::RetrieverError;

/// Response policy for a query.
///
/// `Concise` trades recall for precision (few high-confidence sources, one
/// sentence); `Detailed` trades precision for recall (more context, paragraph
/// synthesis). Anything else is rejected at the parse boundary rather than
/// silently falling through unfiltered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMode {
    #[default]
    Concise,
    Detailed,
}

impl AnswerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerMode::Concise => "concise",
            AnswerMode::Detailed => "detailed",
        }
    }
}

impl fmt::Display for AnswerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerMode {
    type Err = RetrieverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concise" => Ok(AnswerMode::Concise),
            "detailed" => Ok(AnswerMode::Detailed),
            other => Err(RetrieverError::UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes_case_insensitively() {
        assert_eq!("concise".parse::<AnswerMode>().unwrap(), AnswerMode::Concise);
        assert_eq!(
            " Detailed ".parse::<AnswerMode>().unwrap(),
            AnswerMode::Detailed
        );
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(matches!(
            "verbose".parse::<AnswerMode>(),
            Err(RetrieverError::UnknownMode(_))
        ));
    }
}
