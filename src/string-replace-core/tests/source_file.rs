//! End-to-end substitution scenarios over a small JavaScript module.

use pretty_assertions::assert_eq;
use string_replace_core::{Options, Pattern, QueryOptions, Replace, Transformation, replace};

const ENTRY: &str = include_str!("fixtures/entry.js");

fn from_json(json: &str) -> Transformation {
    let options: Options = serde_json::from_str(json).unwrap();
    replace(ENTRY, options).unwrap()
}

#[test]
fn replaces_with_string_search() {
    let result = replace(ENTRY, QueryOptions::new("var value", "var a")).unwrap();
    assert!(!result.text.contains("var value"));
    assert!(result.text.contains("var a"));
}

#[test]
fn replaces_with_pattern_search() {
    let pattern = Pattern::with_flags("var VALUE = '.*'", "ig").unwrap();
    let result = replace(ENTRY, QueryOptions::new(pattern, "var a = ''")).unwrap();
    assert!(!result.text.contains("var value"));
    assert!(result.text.starts_with("var a = '';\n"));
}

#[test]
fn replaces_with_pattern_search_from_config() {
    let result = from_json(
        r#"{"search": {"pattern": "var VALUE = '.*'", "flags": "i"}, "replace": "var a = ''"}"#,
    );
    assert!(result.text.contains("var a = ''"));
}

#[test]
fn replaces_with_function() {
    let pattern = Pattern::with_flags("var value = '(baz)'", "g").unwrap();
    let options = QueryOptions::new(
        pattern,
        Replace::with(|c| format!("var a = '{}'", c.group(1).unwrap_or_default().to_uppercase())),
    );
    let result = replace(ENTRY, options).unwrap();
    assert!(result.text.contains("var a = 'BAZ'"));
}

#[test]
fn replaces_using_multiple_queries() {
    let result = from_json(
        r#"{"multiple": [
            {"search": "var value", "replace": "var a"},
            {"search": "module.exports = value", "replace": "module.exports = a"}
        ]}"#,
    );
    assert!(!result.text.contains("var value"));
    assert!(result.text.contains("var a"));
    assert!(!result.text.contains("module.exports = value"));
    assert!(result.text.contains("module.exports = a"));
}

#[test]
fn use_list_matches_multiple_list() {
    let multiple = from_json(
        r#"{"multiple": [
            {"search": "var value", "replace": "var a"},
            {"search": "module.exports = value", "replace": "module.exports = a"}
        ]}"#,
    );
    let used = from_json(
        r#"{"use": [
            {"options": {"search": "var value", "replace": "var a"}},
            {"options": {"search": "module.exports = value", "replace": "module.exports = a"}}
        ]}"#,
    );
    assert_eq!(used, multiple);
}

#[test]
fn unmatched_search_is_silent_without_strict() {
    let single = from_json(r#"{"search": "nonexistent value", "replace": "var a"}"#);
    assert_eq!(single.text, ENTRY);
    assert!(single.is_clean());

    let multiple =
        from_json(r#"{"multiple": [{"search": "nonexistent value", "replace": "var a"}]}"#);
    assert_eq!(multiple.text, ENTRY);
    assert!(multiple.is_clean());
}

#[test]
fn unmatched_search_fails_in_strict_mode() {
    let expected = "Replace failed (strict mode) : nonexistent value → var a";

    let single =
        from_json(r#"{"search": "nonexistent value", "replace": "var a", "strict": true}"#);
    assert_eq!(single.text, ENTRY);
    assert_eq!(single.failures.len(), 1);
    assert_eq!(single.failures[0].to_string(), expected);

    let multiple = from_json(
        r#"{"multiple": [{"search": "nonexistent value", "replace": "var a", "strict": true}]}"#,
    );
    assert_eq!(multiple.failures[0].to_string(), expected);
}

#[test]
fn missing_search_fails_in_strict_mode() {
    let result = from_json(r#"{"multiple": [{"replace": "var a", "strict": true}]}"#);
    assert_eq!(result.text, ENTRY);
    assert_eq!(
        result.failures[0].to_string(),
        "Replace failed (strict mode) : options.search and options.replace are required"
    );
}

#[test]
fn replaces_only_one_occurrence() {
    let result = from_json(r#"{"search": "abcd", "replace": "efhg"}"#);
    assert_eq!(result.text.matches("abcd").count(), 1);
    assert_eq!(result.text.matches("efhg").count(), 1);
    assert!(result.text.contains("function efhg()"));
}

#[test]
fn replaces_all_occurrences() {
    let result = from_json(r#"{"search": "abcd", "replace": "efgh", "replaceAll": true}"#);
    assert!(!result.text.contains("abcd"));
    assert_eq!(result.text.matches("efgh").count(), 2);
}

#[test]
fn unknown_option_is_rejected() {
    let parsed = serde_json::from_str::<Options>(r#"{"search": "a", "replace": "b", "all": true}"#);
    assert!(parsed.is_err());
}
