//! Placeholder extraction and substitution for prompt content.
//!
//! Variables are written as `{{name}}`. A name is any non-empty run of
//! characters excluding `}`; surrounding whitespace is not significant.
//! Both functions are pure and infallible: unbalanced braces simply
//! don't match.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static VARIABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").unwrap());

/// Distinct trimmed variable names in order of first appearance.
/// Whitespace-only names (`{{ }}`) are dropped.
pub fn extract_variables(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    for caps in VARIABLE.captures_iter(content) {
        let name = caps[1].trim();
        if name.is_empty() {
            continue;
        }
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Replace every `{{name}}` whose trimmed name has an entry in `values`.
/// Placeholders without an entry are re-emitted (in trimmed form) so the
/// caller can tell which variables are still unfilled. Substituted values
/// are not re-scanned; a value containing `{{...}}` survives verbatim.
pub fn fill_variables(content: &str, values: &HashMap<String, String>) -> String {
    VARIABLE
        .replace_all(content, |caps: &Captures<'_>| {
            let name = caps[1].trim();
            match values.get(name) {
                Some(value) => value.clone(),
                None => format!("{{{{{}}}}}", name),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn extracts_nothing_from_plain_text() {
        assert!(extract_variables("no placeholders here").is_empty());
    }

    #[test]
    fn collapses_duplicates_preserving_first_appearance_order() {
        assert_eq!(
            extract_variables("Hi {{name}}, your {{name}} is ready"),
            vec!["name"]
        );
        assert_eq!(
            extract_variables("{{b}} then {{a}} then {{b}}"),
            vec!["b", "a"]
        );
    }

    #[test]
    fn trims_whitespace_around_names() {
        assert_eq!(extract_variables("{{ a }} and {{b}}"), vec!["a", "b"]);
    }

    #[test]
    fn handles_adjacent_placeholders() {
        assert_eq!(extract_variables("{{a}}{{b}}"), vec!["a", "b"]);
    }

    #[test]
    fn drops_whitespace_only_names() {
        assert!(extract_variables("{{ }} and {{  }}").is_empty());
    }

    #[test]
    fn unbalanced_braces_are_not_matches() {
        assert!(extract_variables("{{oops and }}closed{ {x} }").is_empty());
    }

    #[test]
    fn fills_known_variables() {
        assert_eq!(
            fill_variables("Hello {{name}}", &values(&[("name", "Ann")])),
            "Hello Ann"
        );
    }

    #[test]
    fn leaves_unknown_placeholders_intact() {
        assert_eq!(
            fill_variables("Hello {{name}}", &HashMap::new()),
            "Hello {{name}}"
        );
    }

    #[test]
    fn fill_is_identity_without_placeholders() {
        let content = "just text, no variables";
        assert_eq!(
            fill_variables(content, &values(&[("name", "x")])),
            content
        );
    }

    #[test]
    fn filled_output_extracts_to_empty() {
        let content = "Dear {{ user }}, {{item}} ships to {{user}}";
        let vals = values(&[("user", "Ann"), ("item", "book")]);
        let filled = fill_variables(content, &vals);
        assert_eq!(filled, "Dear Ann, book ships to Ann");
        assert!(extract_variables(&filled).is_empty());
    }

    #[test]
    fn substituted_values_are_not_rescanned_in_the_same_pass() {
        let filled = fill_variables("{{a}}", &values(&[("a", "{{b}}")]));
        assert_eq!(filled, "{{b}}");
        // A value containing placeholder syntax becomes visible to a
        // second pass; that pass is the caller's choice.
        assert_eq!(extract_variables(&filled), vec!["b"]);
    }
}
