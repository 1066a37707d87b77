//! Pretty-printing of compact JSON text.
//!
//! This works on the rendered text instead of re-parsing it, so repeated keys
//! and member order survive exactly as built.

const INDENT: &str = "  ";

/// Indent compact JSON with two spaces per level and `": "` after keys.
///
/// Empty objects and arrays stay inline. String contents are copied as-is.
///
/// ```rust
/// assert_eq!(
///     plainsearch::beautify::pretty(r#"{"query":{"match_all":{}}}"#),
///     "{\n  \"query\": {\n    \"match_all\": {}\n  }\n}"
/// );
/// ```
pub fn pretty(compact: &str) -> String {
    let mut out = String::with_capacity(compact.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = compact.chars().peekable();

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' | '[' => {
                let close = if c == '{' { '}' } else { ']' };
                if chars.peek() == Some(&close) {
                    chars.next();
                    out.push(c);
                    out.push(close);
                } else {
                    depth += 1;
                    out.push(c);
                    newline(&mut out, depth);
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                newline(&mut out, depth);
                out.push(c);
            }
            ',' => {
                out.push(c);
                newline(&mut out, depth);
            }
            ':' => out.push_str(": "),
            c if c.is_whitespace() => {}
            _ => out.push(c),
        }
    }

    out
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
