use unicode_normalization::UnicodeNormalization;

/// Canonicalize a raw product-name string for keyword matching.
///
/// Steps, in order:
/// 1. Trim
/// 2. NFKC (full-width/half-width and compatibility forms)
/// 3. Unify long-vowel-mark and dash variants to ー
/// 4. Collapse whitespace runs to a single space
///
/// Total over all inputs; never fails.
pub fn normalize_text(raw: &str) -> String {
    let nfkc: String = raw.trim().nfkc().collect();
    let unified: String = nfkc
        .chars()
        .map(|c| match c {
            '\u{30FC}' | '\u{FF70}' | '\u{2212}' | '\u{2015}' | '\u{2010}' => '\u{30FC}',
            _ => c,
        })
        .collect();
    unified.split_whitespace().collect::<Vec<_>>().join(" ")
}
