/// A run of page text, either plain or a search hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightSpan {
    pub text: String,
    pub matched: bool,
}

/// Single-character lowercase fold; characters whose lowercase form expands
/// to several characters are kept as-is so offsets stay aligned.
pub fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

pub fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

/// Start offsets (in chars) of every non-overlapping, case-insensitive
/// occurrence of `needle` in `haystack`, ascending. The scan resumes after
/// the end of each hit, so `"aaaa"` holds `"aa"` at 0 and 2 only; highlight
/// spans therefore never overlap.
pub fn find_all(haystack: &[char], needle: &[char]) -> Vec<usize> {
    let mut out = Vec::new();
    if needle.is_empty() || needle.len() > haystack.len() {
        return out;
    }
    let needle: Vec<char> = needle.iter().copied().map(fold_char).collect();
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        let hit = haystack[i..i + needle.len()]
            .iter()
            .zip(needle.iter())
            .all(|(a, b)| fold_char(*a) == *b);
        if hit {
            out.push(i);
            i += needle.len();
        } else {
            i += 1;
        }
    }
    out
}

pub fn highlight_matches(text: &str, query: &str) -> Vec<HighlightSpan> {
    let chars: Vec<char> = text.chars().collect();
    let needle: Vec<char> = query.chars().collect();
    let hits = find_all(&chars, &needle);
    if hits.is_empty() {
        if text.is_empty() {
            return Vec::new();
        }
        return vec![HighlightSpan {
            text: text.to_string(),
            matched: false,
        }];
    }
    let mut spans = Vec::with_capacity(hits.len() * 2 + 1);
    let mut start = 0;
    for hit in hits {
        if start < hit {
            spans.push(HighlightSpan {
                text: chars[start..hit].iter().collect(),
                matched: false,
            });
        }
        let end = hit + needle.len();
        spans.push(HighlightSpan {
            text: chars[hit..end].iter().collect(),
            matched: true,
        });
        start = end;
    }
    if start < chars.len() {
        spans.push(HighlightSpan {
            text: chars[start..].iter().collect(),
            matched: false,
        });
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_all_skips_overlapping_hits() {
        assert_eq!(find_all(&fold("aaaa"), &fold("aa")), vec![0, 2]);
        assert_eq!(find_all(&fold("aaa"), &fold("aa")), vec![0]);
    }

    #[test]
    fn find_all_ignores_case() {
        let hay: Vec<char> = "The cat saw THE dog".chars().collect();
        let needle: Vec<char> = "the".chars().collect();
        assert_eq!(find_all(&hay, &needle), vec![0, 12]);
    }

    #[test]
    fn find_all_with_empty_needle_is_empty() {
        assert!(find_all(&fold("text"), &[]).is_empty());
    }

    #[test]
    fn highlight_keeps_original_casing() {
        let spans = highlight_matches("Hello World", "world");
        assert_eq!(
            spans,
            vec![
                HighlightSpan {
                    text: "Hello ".into(),
                    matched: false
                },
                HighlightSpan {
                    text: "World".into(),
                    matched: true
                },
            ]
        );
    }

    #[test]
    fn highlight_marks_multiple_occurrences() {
        let spans = highlight_matches("aba ba", "ba");
        assert_eq!(spans.len(), 4); // "a" + "ba" + " " + "ba"
        assert!(spans[1].matched);
        assert_eq!(spans[3].text, "ba");
        assert!(spans[3].matched);
    }

    #[test]
    fn highlight_without_hits_returns_plain_text() {
        let spans = highlight_matches("plain", "zzz");
        assert_eq!(spans.len(), 1);
        assert!(!spans[0].matched);
        assert!(highlight_matches("", "a").is_empty());
    }
}
