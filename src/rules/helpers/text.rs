//! String scanning helpers.

/// Password length as the game counts it: UTF-16 code units, so an astral
/// emoji such as 🌑 counts as two. Every length-based rule, the character
/// counter, and example-insertion selections go through this.
pub fn character_count(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Sum of all ASCII digits in `s`.
pub fn digit_sum(s: &str) -> u32 {
    s.chars().filter_map(|c| c.to_digit(10)).sum()
}

/// Sum of the leading UTF-16 code unit of every character in `s`. Astral
/// characters contribute their high surrogate.
pub fn ascii_sum(s: &str) -> u64 {
    s.chars().map(|c| c.encode_utf16(&mut [0u16; 2])[0] as u64).sum()
}

/// Case-insensitive palindrome check over ASCII letters and digits only.
pub fn is_palindrome(s: &str) -> bool {
    let cleaned: Vec<u8> =
        s.bytes().map(|b| b.to_ascii_lowercase()).filter(|b| b.is_ascii_lowercase() || b.is_ascii_digit()).collect();
    cleaned.iter().eq(cleaned.iter().rev())
}

pub fn contains_emoji(s: &str) -> bool {
    regex!(r"[\x{1F300}-\x{1F6FF}\x{1F900}-\x{1F9FF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}]").is_match(s)
}

const TEXT_FACES: &[&str] = &["¯\\_(ツ)_/¯", "(╯°□°）╯︵ ┻━┻", "ಠ_ಠ", "( ͡° ͜ʖ ͡°)"];

/// Western emoticons (`:)`, `;-D`), any parenthesised group, or a known text face.
pub fn contains_face(s: &str) -> bool {
    regex!(r"[:;][-~]?[)D(]").is_match(s)
        || regex!(r"\([^)]*\)").is_match(s)
        || TEXT_FACES.iter().any(|face| s.contains(face))
}

/// Every opening or closing tag, in order. Tags may span lines.
pub fn extract_html_tags(s: &str) -> Vec<&str> {
    regex!(r"(?is)</?[a-z].*?>").find_iter(s).map(|m| m.as_str()).collect()
}

/// First character of every space-separated word.
pub fn first_letters_of_words(s: &str) -> String {
    s.split(' ').filter_map(|word| word.chars().next()).collect()
}
