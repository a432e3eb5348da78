//! Query string parsing
//!
//! `application/x-www-form-urlencoded` rules: pairs split on `&`, `+` is a
//! space, `%XX` is a byte. Invalid escapes are kept literally. Path segments
//! use the same decoding without the `+` rule.

/// First value for `name` in a raw query string
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode_component(key) == name)
        .map(|(_, value)| decode_component(value))
}

/// Percent-decode one query component
pub fn decode_component(input: &str) -> String {
    percent_decode(input, true)
}

/// Percent-decode one path segment; `+` stays literal
pub fn decode_path_segment(input: &str) -> String {
    percent_decode(input, false)
}

fn percent_decode(input: &str, plus_is_space: bool) -> String {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' if plus_is_space => out.push(b' '),
            b'%' => {
                if let Some(byte) = bytes.get(i + 1..i + 3).and_then(hex_byte) {
                    out.push(byte);
                    i += 3;
                    continue;
                }
                out.push(b'%');
            }
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_byte(pair: &[u8]) -> Option<u8> {
    let hi = char::from(pair[0]).to_digit(16)?;
    let lo = char::from(pair[1]).to_digit(16)?;
    u8::try_from((hi << 4) | lo).ok()
}
