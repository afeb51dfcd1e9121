//! Tag normalization.
//!
//! Tags behave as a set: surrounding whitespace is trimmed, empty entries
//! are dropped, and duplicates collapse onto their first occurrence.

/// Normalize a list of tags.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}

/// Parse a comma-separated tag string such as `"react, hooks,,state"`.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}
