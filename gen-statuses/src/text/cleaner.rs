//! Paragraph extraction from raw source text.

/// Invisible characters dropped from source text.
const INVISIBLE_CHARS: &[char] = &[
    '\u{200b}', // Zero-width space
    '\u{200c}', // Zero-width non-joiner
    '\u{200d}', // Zero-width joiner
    '\u{feff}', // BOM
];

/// Split text into paragraphs, one per non-blank line.
///
/// Each paragraph has control and zero-width characters removed and runs of
/// spaces/tabs collapsed to a single space.
pub fn paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .collect()
}

fn clean_line(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let mut prev_was_space = false;

    for c in line.chars() {
        if c == ' ' || c == '\t' || c == '\u{00a0}' {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else if is_allowed_char(c) {
            prev_was_space = false;
            result.push(c);
        }
    }

    result.trim().to_string()
}

fn is_allowed_char(c: char) -> bool {
    !c.is_control() && !INVISIBLE_CHARS.contains(&c)
}
