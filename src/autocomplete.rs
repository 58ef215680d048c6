/// Returns the inline completion for `input`: the remainder of the first
/// candidate that has a prefix whose lowercase form equals the trimmed,
/// lowercased input.
///
/// Candidates are scanned in the order given, so the result depends only on
/// that order and the input. Blank input never completes.
pub fn suggest<'a, I>(candidates: I, input: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let query = input.trim();
    if query.is_empty() {
        return String::new();
    }
    let query_lower: String = query.chars().flat_map(char::to_lowercase).collect();
    candidates
        .into_iter()
        .find_map(|candidate| matched_suffix(candidate, &query_lower))
        .map(str::to_string)
        .unwrap_or_default()
}

/// What follows the prefix of `candidate` that lowercases to `query_lower`.
/// Candidates whose case folding changes length at the match boundary have
/// no such prefix and are skipped.
fn matched_suffix<'a>(candidate: &'a str, query_lower: &str) -> Option<&'a str> {
    let mut folded = String::new();
    for (index, ch) in candidate.char_indices() {
        folded.extend(ch.to_lowercase());
        if !query_lower.starts_with(folded.as_str()) {
            return None;
        }
        if folded.len() == query_lower.len() {
            return Some(&candidate[index + ch.len_utf8()..]);
        }
    }
    None
}
