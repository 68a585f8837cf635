//! Decoding of string and template literal bodies.
//!
//! Both functions take the literal's source text with the delimiters already
//! stripped and return the value the literal denotes at runtime.

/// Decode the body of a quoted string literal.
pub fn decode_string(body: &str) -> String {
    unescape(body, false)
}

/// Decode ("cook") the body of a template literal without substitutions.
///
/// In addition to escape sequences, line terminators inside template
/// literals are normalized: `\r\n` and lone `\r` both become `\n`.
pub fn cook_template(body: &str) -> String {
    unescape(body, true)
}

fn unescape(body: &str, template: bool) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(ch) = rest.chars().next() {
        rest = &rest[ch.len_utf8()..];

        match ch {
            '\r' if template => {
                rest = rest.strip_prefix('\n').unwrap_or(rest);
                out.push('\n');
            }
            '\\' => rest = unescape_sequence(rest, &mut out),
            _ => out.push(ch),
        }
    }

    out
}

/// Decode one escape sequence; `rest` starts right after the backslash.
/// Returns the remaining input.
fn unescape_sequence<'a>(rest: &'a str, out: &mut String) -> &'a str {
    let Some(esc) = rest.chars().next() else {
        // Trailing backslash; keep it
        out.push('\\');
        return rest;
    };
    let after = &rest[esc.len_utf8()..];

    match esc {
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        'b' => out.push('\u{8}'),
        'f' => out.push('\u{c}'),
        'v' => out.push('\u{b}'),
        '0' if !after.starts_with(|c: char| c.is_ascii_digit()) => out.push('\0'),
        'x' => {
            if let Some(ch) = after.get(..2).and_then(hex_value).and_then(char::from_u32) {
                out.push(ch);
                return &after[2..];
            }
            out.push('x');
        }
        'u' => {
            if let Some((code, remaining)) = unicode_escape(after) {
                return push_code_unit(code, remaining, out);
            }
            out.push('u');
        }
        // Line continuations produce nothing
        '\r' => return after.strip_prefix('\n').unwrap_or(after),
        '\n' | '\u{2028}' | '\u{2029}' => {}
        other => out.push(other),
    }

    after
}

/// Parse `XXXX` or `{X...}` after `\u`, returning the code point and the
/// input following the escape.
fn unicode_escape(input: &str) -> Option<(u32, &str)> {
    if let Some(braced) = input.strip_prefix('{') {
        let close = braced.find('}')?;
        let code = hex_value(&braced[..close])?;
        return (code <= 0x10FFFF).then(|| (code, &braced[close + 1..]));
    }
    let code = hex_value(input.get(..4)?)?;
    Some((code, &input[4..]))
}

/// Push a decoded `\u` code point, pairing a high surrogate with an
/// immediately following `\uDC00`-`\uDFFF` escape.
fn push_code_unit<'a>(code: u32, rest: &'a str, out: &mut String) -> &'a str {
    if (0xD800..0xDC00).contains(&code) {
        if let Some((low, remaining)) = rest
            .strip_prefix("\\u")
            .and_then(unicode_escape)
            .filter(|(low, _)| (0xDC00..0xE000).contains(low))
        {
            let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
            out.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            return remaining;
        }
    }
    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
    rest
}

fn hex_value(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
