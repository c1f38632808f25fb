//! Quoted-string helpers: the scanner behind the filter lexer, quoting of
//! filter literals, and a whitespace tokenizer that honours quotes.
//!
//! Quoted strings are delimited by `"` and understand the escapes `\"`,
//! `\\`, `\r`, `\n` and `\t`. Any other escaped character stands for itself.

/// Result of scanning the body of a quoted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedScan {
    /// The unescaped contents.
    pub value: String,
    /// Number of bytes consumed, including the closing quote when present.
    pub consumed: usize,
    /// Whether a closing quote was found.
    pub terminated: bool,
}

/// Scans a quoted string body.
///
/// `rest` must start right after the opening quote. Scanning stops after the
/// first unescaped `"` or at the end of input.
pub fn scan_quoted(rest: &str) -> QuotedScan {
    let mut value = String::new();
    let mut chars = rest.char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => {
                return QuotedScan {
                    value,
                    consumed: idx + 1,
                    terminated: true,
                };
            }
            '\\' => match chars.next() {
                Some((_, escaped)) => value.push(unescape_char(escaped)),
                // a lone trailing backslash escapes nothing
                None => break,
            },
            _ => value.push(c),
        }
    }

    QuotedScan {
        value,
        consumed: rest.len(),
        terminated: false,
    }
}

fn unescape_char(c: char) -> char {
    match c {
        'r' => '\r',
        'n' => '\n',
        't' => '\t',
        other => other,
    }
}

/// Splits `input` on whitespace, keeping double-quoted segments together.
///
/// Unlike the filter lexer this is lenient: an unterminated quoted segment at
/// the end of the input is kept as a token.
///
/// # Example
///
/// ```
/// use newsfilter_core::text::tokenize_quoted;
///
/// let tokens = tokenize_quoted(r#"set "foo bar" baz"#);
/// assert_eq!(tokens, vec!["set", "foo bar", "baz"]);
/// ```
pub fn tokenize_quoted(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        if let Some(body) = rest.strip_prefix('"') {
            let scan = scan_quoted(body);
            tokens.push(scan.value);
            rest = &body[scan.consumed..];
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            tokens.push(rest[..end].to_string());
            rest = &rest[end..];
        }
    }

    tokens
}

/// Renders `value` as a quoted filter literal, escaping as needed.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
