//! Lookahead that keeps possible link and image openers unescaped.

/// Decide whether the byte at `index` could open link or image syntax.
///
/// `!` matches when directly followed by `[`. `[` matches when a `]` follows
/// on the same line. Anything else, including an out of range index, is no
/// match.
pub fn match_potential_link_or_image(chars: &[u8], index: usize) -> Option<usize> {
    match chars.get(index)? {
        b'!' => is_image_start(chars, index),
        b'[' => is_bracket_closed_on_line(chars, index),
        _ => None,
    }
}

fn is_image_start(chars: &[u8], index: usize) -> Option<usize> {
    (chars.get(index + 1) == Some(&b'[')).then_some(1)
}

fn is_bracket_closed_on_line(chars: &[u8], index: usize) -> Option<usize> {
    let end = chars[index + 1..]
        .iter()
        .find(|&&b| b == b'\n' || b == b']')?;

    (*end == b']').then_some(1)
}
