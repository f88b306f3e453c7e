use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Longest ticker accepted, exchange suffix included.
pub const MAX_TICKER_LEN: usize = 20;

/// Uppercase ticker such as `AAPL`, `TCS.NS`, `M&M.NS` or `^NSEI`.
///
/// Only blank input and embedded whitespace are refused here. Whether the
/// provider knows the ticker is for the provider to say.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trim, uppercase and check a user-typed ticker.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let ticker = input.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        if let Some((index, ch)) = ticker
            .chars()
            .enumerate()
            .find(|&(_, ch)| ch.is_whitespace() || ch.is_control())
        {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        let len = ticker.chars().count();
        if len > MAX_TICKER_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_TICKER_LEN,
            });
        }

        Ok(Self(ticker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ticker with a provider suffix such as `.NS` appended.
    ///
    /// A ticker already carrying the suffix is returned unchanged.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        if suffix.is_empty() || self.has_suffix(suffix) {
            return self.clone();
        }
        Self(format!("{}{suffix}", self.0))
    }

    pub fn has_suffix(&self, suffix: &str) -> bool {
        !suffix.is_empty() && self.0.ends_with(suffix)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}
