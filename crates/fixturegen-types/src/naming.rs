//! Naming strategy: field identifiers to constant identifiers.
//!
//! Field names are strict lowerCamelCase. They are split into words at
//! lowercase→uppercase boundaries, letter/digit boundaries and acronym
//! boundaries, then upper-cased and joined with `_`:
//!
//! ```text
//! stringField        → STRING_FIELD
//! parseHTTPResponse  → PARSE_HTTP_RESPONSE
//! item1Id            → ITEM_1_ID
//! ```

use convert_case::{Case, Casing};

use crate::error::{FixtureError, FixtureResult};

/// Convert a lowerCamelCase field name into an UPPER_SNAKE_CASE constant name.
pub fn create_name(field_name: &str) -> FixtureResult<String> {
    validate_camel_case(field_name)?;
    let constant = field_name.to_case(Case::Constant);

    // Round-trip: the words must rebuild the input.
    if constant.split('_').any(str::is_empty)
        || constant.replace('_', "") != field_name.to_ascii_uppercase()
    {
        return Err(FixtureError::InvalidIdentifierFormat(format!(
            "'{field_name}' does not split into camel-case words"
        )));
    }
    Ok(constant)
}

/// Convert an UPPER_SNAKE_CASE constant name into word case (`STRING_FIELD` → `StringField`).
pub fn to_word_case(constant_name: &str) -> String {
    constant_name
        .from_case(Case::Constant)
        .to_case(Case::Pascal)
}

/// Upper-case the first character of an identifier (`item` → `Item`).
pub fn capitalize(ident: &str) -> String {
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Whether `name` is usable verbatim as a constant identifier.
pub fn is_constant_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Validate an explicit constant name supplied by a naming directive.
pub fn validate_constant_name(name: &str) -> FixtureResult<()> {
    if is_constant_identifier(name) {
        Ok(())
    } else {
        Err(FixtureError::InvalidIdentifierFormat(format!(
            "'{name}' is not a valid constant identifier"
        )))
    }
}

fn validate_camel_case(field_name: &str) -> FixtureResult<()> {
    let first = field_name.chars().next().ok_or_else(|| {
        FixtureError::InvalidIdentifierFormat("empty field name".to_string())
    })?;

    if field_name.contains('_') {
        return Err(FixtureError::InvalidIdentifierFormat(format!(
            "'{field_name}' contains underscores; expected lowerCamelCase"
        )));
    }
    if !first.is_ascii_lowercase() {
        return Err(FixtureError::InvalidIdentifierFormat(format!(
            "'{field_name}' must start with a lowercase letter"
        )));
    }
    if !field_name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(FixtureError::InvalidIdentifierFormat(format!(
            "'{field_name}' contains characters outside [A-Za-z0-9]"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn simple_camel_case() {
        assert_eq!(create_name("stringField").unwrap(), "STRING_FIELD");
        assert_eq!(create_name("uuidField").unwrap(), "UUID_FIELD");
        assert_eq!(create_name("a").unwrap(), "A");
        assert_eq!(create_name("name").unwrap(), "NAME");
    }

    #[test]
    fn digit_boundaries() {
        assert_eq!(create_name("item1Id").unwrap(), "ITEM_1_ID");
        assert_eq!(create_name("field2").unwrap(), "FIELD_2");
        assert_eq!(create_name("sha256Hash").unwrap(), "SHA_256_HASH");
    }

    #[test]
    fn acronym_boundaries() {
        assert_eq!(create_name("parseHTTPResponse").unwrap(), "PARSE_HTTP_RESPONSE");
        assert_eq!(create_name("baseURL").unwrap(), "BASE_URL");
    }

    #[test]
    fn rejects_snake_case() {
        assert!(matches!(
            create_name("item_id"),
            Err(FixtureError::InvalidIdentifierFormat(_))
        ));
    }

    #[test]
    fn rejects_pascal_case() {
        assert!(matches!(
            create_name("ItemId"),
            Err(FixtureError::InvalidIdentifierFormat(_))
        ));
    }

    #[test]
    fn rejects_empty_and_symbols() {
        assert!(create_name("").is_err());
        assert!(create_name("item$id").is_err());
        assert!(create_name("1item").is_err());
    }

    #[test]
    fn word_case_from_constant() {
        assert_eq!(to_word_case("STRING_FIELD"), "StringField");
        assert_eq!(to_word_case("ITEM_ID_1"), "ItemId1");
        assert_eq!(to_word_case("NAME"), "Name");
    }

    #[test]
    fn constant_identifier_validation() {
        assert!(is_constant_identifier("ITEM_ID_1"));
        assert!(is_constant_identifier("_HIDDEN"));
        assert!(!is_constant_identifier("1ITEM"));
        assert!(!is_constant_identifier("ITEM-ID"));
        assert!(validate_constant_name("").is_err());
    }

    fn camel_words() -> impl Strategy<Value = Vec<String>> {
        ("[a-z]{1,8}", prop::collection::vec("[A-Z][a-z]{1,8}", 0..4)).prop_map(
            |(head, tail)| {
                let mut words = vec![head];
                words.extend(tail);
                words
            },
        )
    }

    proptest! {
        #[test]
        fn camel_case_maps_to_joined_upper_words(words in camel_words()) {
            let input: String = words.concat();
            let expected: Vec<String> = words.iter().map(|w| w.to_ascii_uppercase()).collect();
            prop_assert_eq!(create_name(&input).unwrap(), expected.join("_"));
        }

        #[test]
        fn word_case_recovers_the_capitalized_field(words in camel_words()) {
            let input: String = words.concat();
            let constant = create_name(&input).unwrap();
            prop_assert_eq!(to_word_case(&constant), capitalize(&input));
        }

        #[test]
        fn naming_is_deterministic(words in camel_words()) {
            let input: String = words.concat();
            prop_assert_eq!(create_name(&input).unwrap(), create_name(&input).unwrap());
        }

        #[test]
        fn underscores_always_rejected(a in "[a-z]{1,6}", b in "[a-zA-Z]{0,6}") {
            let input = format!("{a}_{b}");
            prop_assert!(create_name(&input).is_err());
        }

        #[test]
        fn uppercase_first_always_rejected(a in "[A-Z][a-zA-Z0-9]{0,8}") {
            prop_assert!(create_name(&a).is_err());
        }
    }
}
