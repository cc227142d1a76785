/// Decode the small entity subset that shows up in hand-written app markup.
///
/// Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&#39;`-style numerics and `&nbsp;`.
/// Anything unknown or malformed (missing `;`, invalid scalar) is copied through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_one(tail) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

// Longest entity we accept is `&#x10FFFF;`.
const MAX_ENTITY_LEN: usize = 10;

fn decode_one(tail: &str) -> Option<(char, usize)> {
    let semi = tail
        .bytes()
        .take(MAX_ENTITY_LEN)
        .position(|b| b == b';')?;
    let body = &tail[1..semi];
    let consumed = semi + 1;

    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        _ => {
            let num = body.strip_prefix('#')?;
            let value = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(value)?
        }
    };
    Some((ch, consumed))
}
