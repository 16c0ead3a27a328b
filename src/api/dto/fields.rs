//! Custom Serde deserializers for form-style request bodies.
//!
//! Clients post form values, so numbers may arrive as JSON strings and an
//! emptied input arrives as `""`. Both are accepted here:
//!
//! - a JSON number or numeric string → the value
//! - `""` (or only whitespace) → no value
//! - `null` → no value
//!
//! The `patch_*` variants wrap the result in an outer `Option` so a field
//! that is present (even as `null` or `""`) clears the column, while an
//! absent field is left to `#[serde(default)]`.

use serde::{Deserialize, Deserializer, de::Error};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(i64),
    Text(String),
}

fn parse_int<T>(raw: Option<IntOrText>) -> Result<Option<T>, String>
where
    T: TryFrom<i64> + FromStr,
{
    match raw {
        None => Ok(None),
        Some(IntOrText::Int(n)) => T::try_from(n)
            .map(Some)
            .map_err(|_| format!("number out of range: {n}")),
        Some(IntOrText::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<T>()
                .map(Some)
                .map_err(|_| format!("invalid number: {s}"))
        }
    }
}

fn blank_to_none(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

/// Optional integer from a number, a numeric string, `""` or `null`.
pub mod lenient_int {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64> + FromStr,
    {
        let raw = Option::<IntOrText>::deserialize(deserializer)?;
        parse_int(raw).map_err(D::Error::custom)
    }
}

/// Tri-state integer for partial updates.
pub mod patch_int {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64> + FromStr,
    {
        let raw = Option::<IntOrText>::deserialize(deserializer)?;
        parse_int(raw).map(Some).map_err(D::Error::custom)
    }
}

/// Tri-state text for partial updates; blank text clears the column.
pub mod patch_text {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Some(blank_to_none(raw)))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "super::lenient_int::deserialize")]
        pages: Option<i32>,
        #[serde(default, deserialize_with = "super::lenient_int::deserialize")]
        author_id: Option<i64>,
        #[serde(default, deserialize_with = "super::patch_int::deserialize")]
        year: Option<Option<i32>>,
        #[serde(default, deserialize_with = "super::patch_text::deserialize")]
        genre: Option<Option<String>>,
    }

    fn parse(value: serde_json::Value) -> Result<Form, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        let form = parse(json!({"pages": 320, "year": "1967"})).unwrap();
        assert_eq!(form.pages, Some(320));
        assert_eq!(form.year, Some(Some(1967)));

        let form = parse(json!({"pages": " 12 ", "author_id": "7"})).unwrap();
        assert_eq!(form.pages, Some(12));
        assert_eq!(form.author_id, Some(7));
    }

    #[test]
    fn test_empty_string_and_null_mean_no_value() {
        let form = parse(json!({"pages": "", "year": null, "genre": ""})).unwrap();
        assert_eq!(form.pages, None);
        assert_eq!(form.year, Some(None));
        assert_eq!(form.genre, Some(None));
    }

    #[test]
    fn test_absent_fields_are_unchanged() {
        let form = parse(json!({})).unwrap();
        assert_eq!(form.pages, None);
        assert_eq!(form.year, None);
        assert_eq!(form.genre, None);
    }

    #[test]
    fn test_text_value_is_kept_verbatim() {
        let form = parse(json!({"genre": "Realismo mágico"})).unwrap();
        assert_eq!(form.genre, Some(Some("Realismo mágico".to_string())));
    }

    #[test]
    fn test_rejects_non_numeric_text() {
        assert!(parse(json!({"pages": "many"})).is_err());
        assert!(parse(json!({"year": 1e12})).is_err());
        assert!(parse(json!({"pages": 9_999_999_999_i64})).is_err());
    }
}
