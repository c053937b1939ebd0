//! Restricted literal scanner for initializer modules.
//!
//! The scanner reads the initializer as plain text and recognizes exactly one
//! statement shape: a top-level assignment of a quoted string literal to a
//! recognized identifier. Nothing is executed and no syntax tree is built,
//! so metadata can be extracted from the file without running any of its
//! code.

use anyhow::Result;

use crate::core::PkgmetaError;

/// A top-level assignment whose value was a recognized string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralAssignment {
    /// The assignment target identifier.
    pub name: String,
    /// The unquoted literal value.
    pub value: String,
    /// 1-based source line of the assignment.
    pub line: usize,
}

/// Scan `content` for top-level string-literal assignments to `targets`.
///
/// Assignments are returned in encounter order. A target assigned anything
/// other than a plain quoted string (a call, a number, an identifier,
/// concatenation) is a fatal error; lines that do not assign a target at the
/// top level are ignored.
///
/// Both quoting conventions are accepted - double-quoted and single-quoted
/// literals - selected by whichever the statement uses. The escape sequences
/// `\\`, `\"`, `\'`, `\n`, and `\t` are unwrapped; an unrecognized escape is
/// kept verbatim.
pub fn scan(content: &str, targets: &[&str]) -> Result<Vec<LiteralAssignment>> {
    let mut found = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        // Top-level statements start at column zero; indented lines belong
        // to some enclosing block and are never scanned.
        if raw.is_empty() || raw.starts_with(char::is_whitespace) {
            continue;
        }
        let line = raw.trim_end();
        if line.starts_with('#') {
            continue;
        }

        let Some(eq) = line.find('=') else {
            continue;
        };
        // `==` is a comparison, not an assignment.
        if line.as_bytes().get(eq + 1) == Some(&b'=') {
            continue;
        }

        let name = line[..eq].trim();
        if !is_identifier(name) || !targets.contains(&name) {
            continue;
        }

        let value = unquote(name, line[eq + 1..].trim_start())?;
        found.push(LiteralAssignment {
            name: name.to_string(),
            value,
            line: index + 1,
        });
    }

    Ok(found)
}

/// True if `s` is a simple identifier (the only accepted target form).
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Unwrap a quoted string literal, or fail with the rejected value form.
fn unquote(name: &str, value: &str) -> Result<String> {
    let not_literal = |found: &str| {
        anyhow::Error::from(PkgmetaError::MetadataNotLiteral {
            name: name.to_string(),
            found: found.to_string(),
        })
    };

    let quote = match value.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return Err(not_literal(&describe(value))),
    };

    let rest = &value[quote.len_utf8()..];
    let mut out = String::new();
    let mut escaped = false;
    let mut end = None;

    for (i, c) in rest.char_indices() {
        if escaped {
            match c {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                '\\' | '"' | '\'' => out.push(c),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            }
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            end = Some(i);
            break;
        } else {
            out.push(c);
        }
    }

    let Some(end) = end else {
        return Err(not_literal("unterminated string literal"));
    };

    // Only trailing whitespace or a comment may follow the closing quote;
    // anything else makes the value an expression, not a literal.
    let trailing = rest[end + quote.len_utf8()..].trim_start();
    if !trailing.is_empty() && !trailing.starts_with('#') {
        return Err(not_literal("expression after string literal"));
    }

    Ok(out)
}

/// Short description of a rejected value form, for error messages.
fn describe(value: &str) -> String {
    let token: String = value.chars().take_while(|c| !c.is_whitespace()).collect();
    if token.is_empty() {
        "empty value".to_string()
    } else if token.starts_with(|c: char| c.is_ascii_digit()) {
        "numeric literal".to_string()
    } else if token.contains('(') {
        "call expression".to_string()
    } else {
        format!("non-literal expression '{token}'")
    }
}
