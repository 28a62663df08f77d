//! Token splitting shared by the inverted index and its queries.

/// Tokens with no discriminating value, dropped from posting lists and
/// queries alike. Common archive/document extensions land here because
/// almost every filename carries one.
pub const BLACKLISTED_TOKENS: &[&str] = &["pdf", "zip"];

/// Split text into index tokens.
///
/// Boundaries are whitespace plus `.`, `,`, `_` and `-`, so a filename
/// like `example_file.pdf` yields `example` and `file`. Empty and
/// blacklisted tokens are discarded.
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split(is_token_boundary)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter(|token| !BLACKLISTED_TOKENS.contains(token))
        .collect()
}

fn is_token_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | ',' | '_' | '-')
}
