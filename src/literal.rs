//! Unescaping of PDF string tokens.

/// Turns a string token as written in a content stream into its raw bytes.
///
/// Accepts literal strings with or without their outer parentheses and hex
/// strings wrapped in `<` `>`.
pub fn unescape(token: &[u8]) -> Vec<u8> {
    match token {
        [b'(', inner @ .., b')'] => unescape_literal(inner),
        [b'<', inner @ .., b'>'] => unescape_hex(inner),
        _ => unescape_literal(token),
    }
}

fn unescape_literal(s: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut i = 0;
    while i < s.len() {
        let c = s[i];
        i += 1;
        if c != b'\\' {
            out.push(c);
            continue;
        }
        let Some(&e) = s.get(i) else {
            break;
        };
        i += 1;
        match e {
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'0'..=b'7' => {
                let mut code = (e - b'0') as u16;
                for _ in 0..2 {
                    match s.get(i) {
                        Some(&d @ b'0'..=b'7') => {
                            code = code * 8 + (d - b'0') as u16;
                            i += 1;
                        }
                        _ => break,
                    }
                }
                out.push(code as u8);
            }
            // line continuation
            b'\r' => {
                if s.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => {}
            // \( \) \\ and unknown escapes all keep the escaped byte
            other => out.push(other),
        }
    }
    out
}

fn unescape_hex(s: &[u8]) -> Vec<u8> {
    let digits: Vec<u8> = s
        .iter()
        .filter_map(|&c| (c as char).to_digit(16).map(|d| d as u8))
        .collect();
    digits
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_literal() {
        assert_eq!(unescape(b"(Hello)"), b"Hello");
        assert_eq!(unescape(b"Hello"), b"Hello");
    }

    #[test]
    fn escaped_delimiters_and_backslash() {
        assert_eq!(unescape(br"(a\(b\)c\\)"), b"a(b)c\\");
    }

    #[test]
    fn control_escapes() {
        assert_eq!(unescape(br"(\n\r\t\b\f)"), b"\n\r\t\x08\x0c");
    }

    #[test]
    fn octal_escapes() {
        assert_eq!(unescape(br"(\101\1012\7)"), b"AA2\x07");
        assert_eq!(unescape(br"(\0053)"), b"\x053");
    }

    #[test]
    fn line_continuation_is_dropped() {
        assert_eq!(unescape(b"(ab\\\ncd)"), b"abcd");
        assert_eq!(unescape(b"(ab\\\r\ncd)"), b"abcd");
    }

    #[test]
    fn unknown_escape_keeps_char() {
        assert_eq!(unescape(br"(\q)"), b"q");
    }

    #[test]
    fn hex_strings() {
        assert_eq!(unescape(b"<48 65>"), b"He");
        assert_eq!(unescape(b"<414>"), b"A@");
    }
}
