//! Tests for filter evaluation.

use std::borrow::Cow;
use std::cell::Cell;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use super::*;
use crate::Matchable;

// ==================== Test Helpers ====================

/// Record with two fixed attributes.
struct TestMatchable;

impl Matchable for TestMatchable {
    fn has_attribute(&self, name: &str) -> bool {
        name == "abcd" || name == "AAAA"
    }

    fn get_attribute(&self, name: &str) -> Cow<'_, str> {
        match name {
            "abcd" => Cow::Borrowed("xyz"),
            "AAAA" => Cow::Borrowed("12345"),
            _ => Cow::Borrowed(""),
        }
    }
}

/// Record that counts attribute lookups.
struct CountingRecord {
    lookups: Cell<usize>,
}

impl Matchable for CountingRecord {
    fn has_attribute(&self, _name: &str) -> bool {
        self.lookups.set(self.lookups.get() + 1);
        true
    }

    fn get_attribute(&self, name: &str) -> Cow<'_, str> {
        Cow::Owned(name.to_string())
    }
}

fn record(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn matches(query: &str, record: &impl Matchable) -> bool {
    Matcher::bind(query).unwrap().matches(record)
}

// ==================== Comparison Tests ====================

#[test]
fn test_equality() {
    assert!(matches(r#"abcd = "xyz""#, &TestMatchable));
    assert!(!matches(r#"abcd = "uiop""#, &TestMatchable));
}

#[test]
fn test_inequality() {
    assert!(matches(r#"abcd != "uiop""#, &TestMatchable));
    assert!(!matches(r#"abcd != "xyz""#, &TestMatchable));
}

#[test]
fn test_equality_is_exact() {
    assert!(!matches(r#"abcd = "xy""#, &TestMatchable));
    assert!(!matches(r#"abcd = "XYZ""#, &TestMatchable));
    assert!(!matches(r#"abcd = "xyz ""#, &TestMatchable));
}

#[test]
fn test_regex_match_is_unanchored() {
    assert!(matches(r#"AAAA =~ "234""#, &TestMatchable));
    assert!(matches(r#"AAAA =~ "^1[0-9]+5$""#, &TestMatchable));
    assert!(!matches(r#"AAAA =~ "^2""#, &TestMatchable));
    assert!(matches(r#"abcd =~ "y""#, &TestMatchable));
}

#[test]
fn test_regex_not_match() {
    assert!(matches(r#"AAAA !~ "[a-z]""#, &TestMatchable));
    assert!(!matches(r#"AAAA !~ "3""#, &TestMatchable));
}

#[test]
fn test_regex_and_equality_on_empty_value() {
    let rec = record(&[("author", "")]);
    assert!(matches(r#"author = """#, &rec));
    assert!(matches(r#"author =~ "^$""#, &rec));
    assert!(!matches(r#"author != """#, &rec));
}

// ==================== Boolean Operator Tests ====================

#[test]
fn test_and_or() {
    assert!(matches(r#"abcd = "xyz" and AAAA = "12345""#, &TestMatchable));
    assert!(!matches(r#"abcd = "xyz" and AAAA = "0""#, &TestMatchable));
    assert!(matches(r#"abcd = "no" or AAAA = "12345""#, &TestMatchable));
    assert!(!matches(r#"abcd = "no" or AAAA = "0""#, &TestMatchable));
}

#[test]
fn test_precedence_in_evaluation() {
    // true or (false and false) == true; (true or false) and false == false
    assert!(matches(
        r#"abcd = "xyz" or abcd = "no" and AAAA = "0""#,
        &TestMatchable
    ));
    assert!(!matches(
        r#"(abcd = "xyz" or abcd = "no") and AAAA = "0""#,
        &TestMatchable
    ));
}

#[test]
fn test_complex_query() {
    let rec = record(&[("a", "b"), ("b", "c"), ("c", "d")]);
    let query = r#"(a="b") and (b="c") or ((c!="d") and (c!~"asdf")) or c!="xx""#;
    assert!(matches(query, &rec));

    // first pair fails, second fails (c = d), last holds (c != xx)
    let rec = record(&[("a", "x"), ("b", "c"), ("c", "d")]);
    assert!(matches(query, &rec));

    // nothing holds
    let rec = record(&[("a", "x"), ("b", "c"), ("c", "xx")]);
    assert!(!matches(query, &rec));
}

#[test]
fn test_and_short_circuits() {
    let rec = CountingRecord {
        lookups: Cell::new(0),
    };
    let matcher = Matcher::bind(r#"x = "nope" and y = "y" and z = "z""#).unwrap();
    assert!(!matcher.matches(&rec));
    assert_eq!(rec.lookups.get(), 1);
}

#[test]
fn test_or_short_circuits() {
    let rec = CountingRecord {
        lookups: Cell::new(0),
    };
    let matcher = Matcher::bind(r#"x = "x" or y = "nope" or z = "nope""#).unwrap();
    assert!(matcher.matches(&rec));
    assert_eq!(rec.lookups.get(), 1);
}

// ==================== Missing Attribute Tests ====================

#[test]
fn test_missing_attribute_policy() {
    assert!(!matches(r#"zzz = "anything""#, &TestMatchable));
    assert!(matches(r#"zzz != "anything""#, &TestMatchable));
    assert!(!matches(r#"zzz =~ "anything""#, &TestMatchable));
    assert!(matches(r#"zzz !~ "anything""#, &TestMatchable));
}

#[test]
fn test_missing_attribute_never_equals_empty_literal() {
    // TestMatchable answers "" for unknown names; existence decides, not the value
    assert!(!matches(r#"zzz = """#, &TestMatchable));
    assert!(!matches(r#"zzz =~ "^$""#, &TestMatchable));
    assert!(!matches(r#"zzz =~ """#, &TestMatchable));
}

#[test]
fn test_missing_attribute_policy_holds_for_any_literal() {
    let literals = ["", "anything", "xyz", "12345", ".*", "^$", "a b c", "ünïcödé"];
    let names = ["zzz", "ABCD", "abcde", "aaaa", "title"];

    for name in names {
        for literal in literals {
            let lit = crate::text::quote(literal);
            let eq = matches(&format!("{name} = {lit}"), &TestMatchable);
            let ne = matches(&format!("{name} != {lit}"), &TestMatchable);
            let re = matches(&format!("{name} =~ {lit}"), &TestMatchable);
            let nre = matches(&format!("{name} !~ {lit}"), &TestMatchable);

            assert!(!eq && ne, "equality policy broken for {name} {literal:?}");
            assert!(!re && nre, "regex policy broken for {name} {literal:?}");
        }
    }
}

#[test]
fn test_present_attribute_equality_is_complementary() {
    let literals = ["", "xyz", "uiop", "12345", "XYZ"];
    for name in ["abcd", "AAAA"] {
        for literal in literals {
            let lit = crate::text::quote(literal);
            let eq = matches(&format!("{name} = {lit}"), &TestMatchable);
            let ne = matches(&format!("{name} != {lit}"), &TestMatchable);
            assert_ne!(eq, ne, "{name} = / != {literal:?} not complementary");
        }
    }
}

// ==================== Invalid Pattern Tests ====================

#[test]
fn test_invalid_pattern_binds() {
    let matcher = Matcher::bind(r#"abcd =~ "([""#).unwrap();
    assert_eq!(matcher.pattern_errors().len(), 1);
}

#[test]
fn test_invalid_pattern_evaluates_false_for_both_operators() {
    assert!(!matches(r#"abcd =~ "([""#, &TestMatchable));
    assert!(!matches(r#"abcd !~ "([""#, &TestMatchable));
}

#[test]
fn test_invalid_pattern_does_not_abort_expression() {
    assert!(matches(r#"abcd =~ "([" or AAAA = "12345""#, &TestMatchable));
    assert!(!matches(r#"abcd =~ "([" and AAAA = "12345""#, &TestMatchable));
}

#[test]
fn test_evaluate_reports_errors() {
    let matcher = Matcher::bind(r#"abcd =~ "([" or AAAA = "12345""#).unwrap();
    let evaluation = matcher.evaluate(&TestMatchable);

    assert!(evaluation.matched);
    assert_eq!(evaluation.errors.len(), 1);
    assert!(matches!(
        &evaluation.errors[0],
        EvaluationError::InvalidPattern { pattern, .. } if pattern == "(["
    ));
}

#[test]
fn test_evaluate_without_errors() {
    let matcher = Matcher::bind(r#"abcd = "xyz""#).unwrap();
    let evaluation = matcher.evaluate(&TestMatchable);
    assert!(evaluation.matched);
    assert!(evaluation.errors.is_empty());
    assert!(matcher.pattern_errors().is_empty());
}

#[test]
fn test_invalid_pattern_against_missing_attribute_uses_missing_policy() {
    let matcher = Matcher::bind(r#"zzz !~ "([""#).unwrap();
    let evaluation = matcher.evaluate(&TestMatchable);
    assert!(evaluation.matched);
    assert!(evaluation.errors.is_empty());
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn warn_lines(&self) -> usize {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains("WARN"))
            .count()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_invalid_pattern_warns_once_per_bind() {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let matcher = Matcher::bind(r#"abcd =~ "(" or abcd !~ "(""#).unwrap();
        let records: Vec<TestMatchable> = (0..1000).map(|_| TestMatchable).collect();

        assert!(matcher.filter_records(&records).is_empty());
        assert_eq!(matcher.evaluate(&TestMatchable).errors.len(), 2);
    });

    assert_eq!(capture.warn_lines(), 1);
}

#[test]
fn test_pattern_errors_deduplicated() {
    let matcher = Matcher::bind(r#"a =~ "([" or b !~ "([" or c =~ "ok""#).unwrap();
    assert_eq!(matcher.pattern_errors().len(), 1);
}

// ==================== Matcher Behaviour Tests ====================

#[test]
fn test_evaluation_is_idempotent() {
    let matcher = Matcher::bind(r#"abcd =~ "x" and AAAA != "0""#).unwrap();
    let first = matcher.matches(&TestMatchable);
    let second = matcher.matches(&TestMatchable);
    assert!(first);
    assert_eq!(first, second);
}

#[test]
fn test_binding_twice_is_equivalent() {
    let query = r#"(abcd = "xyz" or AAAA =~ "^9") and abcd !~ "q""#;
    let first = Matcher::bind(query).unwrap();
    let second = Matcher::bind(query).unwrap();
    assert_eq!(first.expr(), second.expr());

    let records = [
        record(&[("abcd", "xyz")]),
        record(&[("abcd", "q"), ("AAAA", "9")]),
        record(&[("AAAA", "91")]),
        record(&[]),
    ];
    for rec in &records {
        assert_eq!(first.matches(rec), second.matches(rec));
    }
}

#[test]
fn test_from_expr_uses_canonical_query() {
    let expr = Expr::and(
        Expr::comparison("abcd", Operator::Eq, "xyz"),
        Expr::comparison("AAAA", Operator::RegexMatch, "^1"),
    );
    let matcher = Matcher::from_expr(expr.clone());
    assert_eq!(matcher.query(), r#"(abcd = "xyz" and AAAA =~ "^1")"#);
    assert_eq!(matcher.expr(), &expr);
    assert!(matcher.matches(&TestMatchable));
}

#[test]
fn test_bind_rejects_syntax_errors() {
    assert!(matches!(
        Matcher::bind("abcd = xyz"),
        Err(FilterError::ExpectedString { .. })
    ));
}

#[test]
fn test_filter_records() {
    let records = vec![
        record(&[("title", "Rust 1.0")]),
        record(&[("title", "Go 1.0")]),
        record(&[("author", "nobody")]),
    ];
    let matcher = Matcher::bind(r#"title =~ "Rust""#).unwrap();
    let matched = matcher.filter_records(&records);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].get("title").map(String::as_str), Some("Rust 1.0"));
}

#[test]
fn test_matcher_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Matcher>();

    let matcher = std::sync::Arc::new(Matcher::bind(r#"n =~ "^[0-9]*[02468]$""#).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let matcher = std::sync::Arc::clone(&matcher);
            std::thread::spawn(move || {
                (0..50)
                    .filter(|i| {
                        let n = (t * 50 + i).to_string();
                        matcher.matches(&record(&[("n", n.as_str())]))
                    })
                    .count()
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 100);
}
