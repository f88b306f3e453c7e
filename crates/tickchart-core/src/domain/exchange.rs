use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Exchange selector offered next to the ticker field.
///
/// Each variant maps to the namespace suffix the provider expects after the
/// ticker. `Nasdaq` and `None` both leave the ticker untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exchange {
    #[default]
    Nasdaq,
    Nse,
    Bse,
    None,
}

impl Exchange {
    pub const ALL: [Self; 4] = [Self::Nasdaq, Self::Nse, Self::Bse, Self::None];

    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Nasdaq | Self::None => "",
            Self::Nse => ".NS",
            Self::Bse => ".BO",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nasdaq => "NASDAQ",
            Self::Nse => "NSE",
            Self::Bse => "BSE",
            Self::None => "None",
        }
    }
}

impl Display for Exchange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nasdaq" => Ok(Self::Nasdaq),
            "nse" => Ok(Self::Nse),
            "bse" => Ok(Self::Bse),
            "none" | "" => Ok(Self::None),
            _ => Err(ValidationError::InvalidExchange {
                value: value.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_selectors_to_suffixes() {
        assert_eq!(Exchange::Nasdaq.suffix(), "");
        assert_eq!(Exchange::Nse.suffix(), ".NS");
        assert_eq!(Exchange::Bse.suffix(), ".BO");
        assert_eq!(Exchange::None.suffix(), "");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("nse".parse::<Exchange>(), Ok(Exchange::Nse));
        assert_eq!(" BSE ".parse::<Exchange>(), Ok(Exchange::Bse));
        assert_eq!("None".parse::<Exchange>(), Ok(Exchange::None));
        assert!(matches!(
            "LSE".parse::<Exchange>(),
            Err(ValidationError::InvalidExchange { .. })
        ));
    }
}
