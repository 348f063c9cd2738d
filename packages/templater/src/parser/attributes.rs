//! Attribute lookup for a single start-element event.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{Result, TemplaterError};

/// Which spellings of an attribute name are recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttributeCase {
    /// Only the all-upper-case spelling (`NAME`), then the all-lower-case
    /// spelling (`name`). `Name` is not recognised.
    #[default]
    UpperOrLower,
    /// Any spelling. Upper- and lower-case spellings still take precedence
    /// when an element carries several.
    Insensitive,
}

/// Attribute values of one element, built once per start-element.
///
/// Empty values are treated as absent, so an empty upper-case spelling
/// falls through to the lower-case one and optional fields keep their
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    element: String,
    exact: HashMap<String, String>,
    folded: HashMap<String, String>,
    case: AttributeCase,
    has_any: bool,
}

impl Attributes {
    /// Collect name/value pairs of one start tag.
    ///
    /// `element` names the element in error messages.
    pub fn new(
        pairs: impl IntoIterator<Item = (String, String)>,
        element: impl Into<String>,
        case: AttributeCase,
    ) -> Self {
        let mut exact = HashMap::new();
        let mut folded = HashMap::new();
        let mut has_any = false;

        for (name, value) in pairs {
            has_any = true;
            if value.is_empty() {
                continue;
            }
            if case == AttributeCase::Insensitive {
                folded
                    .entry(name.to_ascii_lowercase())
                    .or_insert_with(|| value.clone());
            }
            exact.insert(name, value);
        }

        Self {
            element: element.into(),
            exact,
            folded,
            case,
            has_any,
        }
    }

    /// Name of the element these attributes belong to.
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Whether the element carries any attribute at all, empty or not.
    pub fn has_any(&self) -> bool {
        self.has_any
    }

    /// Look up an attribute by its upper-case name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let upper = name.to_ascii_uppercase();
        if let Some(value) = self.exact.get(&upper) {
            return Some(value);
        }

        let lower = name.to_ascii_lowercase();
        if let Some(value) = self.exact.get(&lower) {
            return Some(value);
        }

        match self.case {
            AttributeCase::UpperOrLower => None,
            AttributeCase::Insensitive => self.folded.get(&lower).map(String::as_str),
        }
    }

    /// Look up an attribute as an owned string.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    /// Look up an attribute and convert it with `FromStr`.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// `InvalidFieldValue` naming `expected` when conversion fails.
    pub fn parse<T: FromStr>(&self, name: &str, expected: &'static str) -> Result<Option<T>> {
        let Some(raw) = self.get(name) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| self.invalid(name, raw, expected))
    }

    /// Look up a `true`/`false` flag (any case).
    ///
    /// # Errors
    /// `InvalidFieldValue` for anything other than `true` or `false`.
    pub fn flag(&self, name: &str) -> Result<Option<bool>> {
        let Some(raw) = self.get(name) else {
            return Ok(None);
        };
        match raw.trim() {
            v if v.eq_ignore_ascii_case("true") => Ok(Some(true)),
            v if v.eq_ignore_ascii_case("false") => Ok(Some(false)),
            _ => Err(self.invalid(name, raw, "true or false")),
        }
    }

    /// The first character of an attribute value.
    pub fn first_char(&self, name: &str) -> Option<char> {
        self.get(name).and_then(|value| value.chars().next())
    }

    fn invalid(&self, name: &str, value: &str, expected: &'static str) -> TemplaterError {
        TemplaterError::InvalidFieldValue {
            element: self.element.clone(),
            attribute: name.to_ascii_uppercase(),
            value: value.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::handlers::test_support::first_element;

    fn with_attributes<R>(xml: &str, case: AttributeCase, f: impl FnOnce(&Attributes) -> R) -> R {
        let attrs = Attributes::new(first_element(xml).attributes, "REGION", case);
        f(&attrs)
    }

    #[test]
    fn test_upper_and_lower_spellings() {
        with_attributes(r#"<REGION REGIONID="x"/>"#, AttributeCase::UpperOrLower, |a| {
            assert_eq!(a.get("REGIONID"), Some("x"));
        });
        with_attributes(r#"<REGION regionid="x"/>"#, AttributeCase::UpperOrLower, |a| {
            assert_eq!(a.get("REGIONID"), Some("x"));
        });
    }

    #[test]
    fn test_mixed_case_ignored_by_default() {
        with_attributes(r#"<REGION RegionId="x"/>"#, AttributeCase::UpperOrLower, |a| {
            assert_eq!(a.get("REGIONID"), None);
            assert!(a.has_any());
        });
    }

    #[test]
    fn test_mixed_case_accepted_when_insensitive() {
        with_attributes(r#"<REGION RegionId="x"/>"#, AttributeCase::Insensitive, |a| {
            assert_eq!(a.get("REGIONID"), Some("x"));
        });
    }

    #[test]
    fn test_upper_case_wins_over_lower_case() {
        with_attributes(r#"<REGION regionid="low" REGIONID="up"/>"#, AttributeCase::UpperOrLower, |a| {
            assert_eq!(a.get("REGIONID"), Some("up"));
        });
    }

    #[test]
    fn test_empty_upper_falls_back_to_lower() {
        with_attributes(r#"<REGION REGIONID="" regionid="low"/>"#, AttributeCase::UpperOrLower, |a| {
            assert_eq!(a.get("REGIONID"), Some("low"));
        });
    }

    #[test]
    fn test_empty_value_is_absent() {
        with_attributes(r#"<REGION URL=""/>"#, AttributeCase::UpperOrLower, |a| {
            assert_eq!(a.get("URL"), None);
            assert!(a.has_any());
        });
    }

    #[test]
    fn test_parse_integer() {
        with_attributes(r#"<REGION WIDTH=" 10 " BAD="abc"/>"#, AttributeCase::UpperOrLower, |a| {
            assert_eq!(a.parse::<i16>("WIDTH", "a 16-bit integer").unwrap(), Some(10));
            assert_eq!(a.parse::<i16>("MISSING", "a 16-bit integer").unwrap(), None);

            let err = a.parse::<i16>("BAD", "a 16-bit integer").unwrap_err();
            assert!(matches!(
                err,
                TemplaterError::InvalidFieldValue { ref attribute, ref value, .. }
                    if attribute == "BAD" && value == "abc"
            ));
        });
    }

    #[test]
    fn test_flag() {
        with_attributes(r#"<REGION A="True" B="false" C="yes"/>"#, AttributeCase::UpperOrLower, |a| {
            assert_eq!(a.flag("A").unwrap(), Some(true));
            assert_eq!(a.flag("B").unwrap(), Some(false));
            assert_eq!(a.flag("D").unwrap(), None);
            assert!(a.flag("C").is_err());
        });
    }

    #[test]
    fn test_first_char() {
        with_attributes(r#"<REGION PAD="0x" U="é"/>"#, AttributeCase::UpperOrLower, |a| {
            assert_eq!(a.first_char("PAD"), Some('0'));
            assert_eq!(a.first_char("U"), Some('é'));
            assert_eq!(a.first_char("NONE"), None);
        });
    }
}
