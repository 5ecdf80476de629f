use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target base indentation for script content.
///
/// Accepted forms:
/// - `"auto"`: each block's own first non-blank line sets the baseline
/// - `n` or `"n"`: exactly `n` spaces
/// - `"+n"` / `"-n"`: the indentation of the line holding the opening tag,
///   extended (or shortened) by `n` spaces
///
/// `Absolute(0)` is not `Auto`: it strips nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawIndent", into = "RawIndent")]
pub enum IndentDescriptor {
    #[default]
    Auto,
    Absolute(usize),
    Relative(isize),
}

impl FromStr for IndentDescriptor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidIndent {
            value: s.to_string(),
        };
        let value = s.trim();

        if value.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }

        let (sign, digits) = match value.as_bytes().first() {
            Some(b'+') => (Some(1), &value[1..]),
            Some(b'-') => (Some(-1), &value[1..]),
            _ => (None, value),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        match sign {
            Some(sign) => digits
                .parse::<isize>()
                .map(|width| Self::Relative(sign * width))
                .map_err(|_| invalid()),
            None => digits
                .parse::<usize>()
                .map(Self::Absolute)
                .map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for IndentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Absolute(width) => write!(f, "{width}"),
            Self::Relative(delta) => write!(f, "{delta:+}"),
        }
    }
}

/// Wire form: an integer or a string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawIndent {
    Number(i64),
    Text(String),
}

impl TryFrom<RawIndent> for IndentDescriptor {
    type Error = ConfigError;

    fn try_from(raw: RawIndent) -> Result<Self, Self::Error> {
        match raw {
            RawIndent::Number(width) => usize::try_from(width)
                .map(Self::Absolute)
                .map_err(|_| ConfigError::InvalidIndent {
                    value: width.to_string(),
                }),
            RawIndent::Text(text) => text.parse(),
        }
    }
}

impl From<IndentDescriptor> for RawIndent {
    fn from(indent: IndentDescriptor) -> Self {
        match indent {
            IndentDescriptor::Absolute(width) => {
                i64::try_from(width).map_or_else(|_| Self::Text(width.to_string()), Self::Number)
            }
            other => Self::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!("auto".parse::<IndentDescriptor>().unwrap(), IndentDescriptor::Auto);
        assert_eq!("AUTO".parse::<IndentDescriptor>().unwrap(), IndentDescriptor::Auto);
        assert_eq!(
            "0".parse::<IndentDescriptor>().unwrap(),
            IndentDescriptor::Absolute(0)
        );
        assert_eq!(
            " 4 ".parse::<IndentDescriptor>().unwrap(),
            IndentDescriptor::Absolute(4)
        );
        assert_eq!(
            "+2".parse::<IndentDescriptor>().unwrap(),
            IndentDescriptor::Relative(2)
        );
        assert_eq!(
            "-3".parse::<IndentDescriptor>().unwrap(),
            IndentDescriptor::Relative(-3)
        );
        assert_eq!(
            "+0".parse::<IndentDescriptor>().unwrap(),
            IndentDescriptor::Relative(0)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "+", "-", "two", "+-2", "2.5", "--1", "+ 2", "99999999999999999999999"] {
            let error = input.parse::<IndentDescriptor>().unwrap_err();
            assert!(
                matches!(error, ConfigError::InvalidIndent { .. }),
                "{input:?} gave {error:?}"
            );
        }
    }

    #[test]
    fn test_absolute_zero_is_not_auto() {
        assert_ne!(IndentDescriptor::Absolute(0), IndentDescriptor::Auto);
        assert_ne!(
            "0".parse::<IndentDescriptor>().unwrap(),
            IndentDescriptor::Auto
        );
    }

    #[test]
    fn test_display_parses_back() {
        for indent in [
            IndentDescriptor::Auto,
            IndentDescriptor::Absolute(3),
            IndentDescriptor::Relative(2),
            IndentDescriptor::Relative(-1),
        ] {
            assert_eq!(indent.to_string().parse::<IndentDescriptor>().unwrap(), indent);
        }
        assert_eq!(IndentDescriptor::Relative(2).to_string(), "+2");
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        let indent: IndentDescriptor = serde_json::from_str("2").unwrap();
        assert_eq!(indent, IndentDescriptor::Absolute(2));

        let indent: IndentDescriptor = serde_json::from_str("\"-4\"").unwrap();
        assert_eq!(indent, IndentDescriptor::Relative(-4));

        assert!(serde_json::from_str::<IndentDescriptor>("-1").is_err());
        assert!(serde_json::from_str::<IndentDescriptor>("\"sideways\"").is_err());

        assert_eq!(
            serde_json::to_string(&IndentDescriptor::Absolute(2)).unwrap(),
            "2"
        );
        assert_eq!(
            serde_json::to_string(&IndentDescriptor::Relative(2)).unwrap(),
            "\"+2\""
        );
    }
}
