//! Attribute codecs for the text-based graph encodings.
//!
//! Attributes travel as a single whitespace-free token. The engine itself only
//! needs equality on attributes; this trait is required by the loaders and
//! writers alone.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An attribute that can be read from and written to one text token.
pub trait TextAttr: Sized {
    /// Parse the attribute from the next token of a record, `None` when the
    /// record has no more tokens.
    ///
    /// # Errors
    /// A human readable reason when the token is missing or invalid.
    fn parse_attr(token: Option<&str>) -> Result<Self, String>;

    /// The token to write for this attribute, `None` to write nothing.
    fn to_token(&self) -> Option<String>;
}

/// The attribute of graphs that carry no information on nodes or edges.
///
/// Reads nothing, writes nothing, and every value is equal to every other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Empty;

impl fmt::Display for Empty {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

impl TextAttr for Empty {
    fn parse_attr(_token: Option<&str>) -> Result<Self, String> {
        Ok(Self)
    }

    fn to_token(&self) -> Option<String> {
        None
    }
}

macro_rules! text_attr_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TextAttr for $ty {
                fn parse_attr(token: Option<&str>) -> Result<Self, String> {
                    let token = token.ok_or_else(|| "missing attribute".to_string())?;
                    token
                        .parse::<$ty>()
                        .map_err(|e| format!("invalid {} attribute '{token}': {e}", stringify!($ty)))
                }

                fn to_token(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

text_attr_from_str!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char, String
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ignores_tokens() {
        assert_eq!(Empty::parse_attr(Some("whatever")), Ok(Empty));
        assert_eq!(Empty::parse_attr(None), Ok(Empty));
        assert_eq!(Empty.to_token(), None);
    }

    #[test]
    fn integers_round_trip() {
        assert_eq!(i32::parse_attr(Some("-42")), Ok(-42));
        assert_eq!((-42i32).to_token().as_deref(), Some("-42"));
    }

    #[test]
    fn missing_or_bad_tokens_fail() {
        assert!(u32::parse_attr(None).is_err());
        let err = u32::parse_attr(Some("x1")).unwrap_err();
        assert!(err.contains("x1"), "{err}");
    }
}
