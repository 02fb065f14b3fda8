use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Engine;

// Whitespace (including ZWNBSP and NBSP), ASCII punctuation and the
// full-width CJK punctuation that shows up in lesson text.
static BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r##"[\s\u{FEFF}\u{00A0}!"#$%&'()*+,\-./:;<=>?@\[\\\]^_`{|}~。、，；：？！「」『』（）…]"##)
        .unwrap()
});

fn is_break(c: char) -> bool {
    BREAK_REGEX.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Splits `text` into pieces of at most `max_length` characters, cutting after
/// the last break character that fits. A run without breaks is cut hard.
pub fn split_long_text(text: &str, max_length: usize) -> Vec<String> {
    let max_length = max_length.max(1);
    let chars: Vec<char> = text.chars().collect();

    let mut result = Vec::new();
    let mut start = 0;

    loop {
        if chars.len() - start <= max_length {
            result.push(chars[start..].iter().collect());
            break;
        }

        let hard_end = start + max_length - 1;

        let end = if is_break(chars[hard_end + 1]) {
            hard_end
        } else {
            (start..=hard_end)
                .rev()
                .find(|&i| is_break(chars[i]))
                .unwrap_or(hard_end)
        };

        result.push(chars[start..=end].iter().collect());
        start = end + 1;
    }

    result
}

/// Chunks sized for one request to `engine`.
pub fn chunks_for(engine: Engine, text: &str) -> Vec<String> {
    split_long_text(text, engine.max_chunk_chars())
}
