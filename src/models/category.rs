/// Normalize a user-supplied category: trim surrounding whitespace, title-case
/// the first character and lower-case the rest.
///
/// Multi-word names only get their first letter capitalized, so
/// `"food delivery"` and `"Food Delivery"` both become `"Food delivery"`.
pub fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(trimmed.len());
    if let Some(title) = digraph_titlecase(first) {
        out.push(title);
        out.push_str(&chars.as_str().to_lowercase());
        return out;
    }

    // Characters like 'ß' upper-case to several chars; keep only the leading
    // one upper-cased so that normalizing twice is a no-op.
    let mut upper = first.to_uppercase();
    if let Some(head) = upper.next() {
        out.push(head);
    }
    let tail: String = upper.chain(chars).collect();
    out.push_str(&tail.to_lowercase());
    out
}

/// Latin digraphs title-case to their own form (`ǆ` -> `ǅ`, not `Ǆ`).
/// std only offers upper case.
fn digraph_titlecase(c: char) -> Option<char> {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => Some('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => Some('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => Some('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => Some('ǲ'),
        _ => None,
    }
}
