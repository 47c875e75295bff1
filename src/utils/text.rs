/// Canonical form used for fuzzy substring search.
///
/// Lowercases, folds typographic quotes to a straight double quote, then
/// strips dashes, whitespace, and quote characters. Applied identically to
/// the query and to each candidate name.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .filter(|c| !matches!(c, '-' | '"' | '\'') && !c.is_whitespace())
        .collect()
}

/// True when `name` contains `query` after both are normalized.
pub fn matches_query(name: &str, query: &str) -> bool {
    normalize(name).contains(&normalize(query))
}
