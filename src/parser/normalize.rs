/// Canonicalizes whitespace in one raw line: full-width ideographic spaces
/// (U+3000) become ordinary spaces and any run of whitespace collapses to a
/// single space. Pure, total, and idempotent.
pub fn normalize_line(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut in_whitespace_run = false;

    for character in raw.chars() {
        let character = if character == '\u{3000}' { ' ' } else { character };

        if character.is_whitespace() {
            if !in_whitespace_run {
                normalized.push(' ');
                in_whitespace_run = true;
            }
        } else {
            normalized.push(character);
            in_whitespace_run = false;
        }
    }

    normalized
}
