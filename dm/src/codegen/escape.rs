//! Literal escaping for generated source
//!
//! Everything user-supplied that lands in generated Rust or TOML goes through
//! one of these functions.

/// Fallback crate name when nothing usable survives sanitising
pub const FALLBACK_CRATE_NAME: &str = "docs-server";

/// Quote `s` as a Rust string literal
///
/// `str`'s `Debug` output is valid Rust literal syntax: quotes, backslashes,
/// control characters and non-printable code points come out as escapes.
pub fn rust_string_literal(s: &str) -> String {
    format!("{:?}", s)
}

/// Quote `s` as a TOML basic string
pub fn toml_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Turn an arbitrary label into a valid cargo package name
///
/// Lowercases ASCII, maps every other character to `-`, collapses runs of
/// separators and makes sure the result starts with a letter.
pub fn crate_name(label: &str) -> String {
    let mut name = String::with_capacity(label.len());
    for c in label.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || c == '_' {
            name.push(c);
        } else if !name.ends_with('-') {
            name.push('-');
        }
    }
    let name = name.trim_matches(|c| c == '-' || c == '_');

    match name.chars().next() {
        None => FALLBACK_CRATE_NAME.to_string(),
        Some(first) if first.is_ascii_digit() => format!("docs-{}", name),
        Some(_) => name.to_string(),
    }
}
