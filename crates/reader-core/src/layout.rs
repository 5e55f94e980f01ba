mod paginate;

pub use paginate::{has_page_after, page, page_for_offset, total_pages, PageSlice, PAGE_SIZE};

/// Raw book text, addressed by character offset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    chars: Vec<char>,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Offset of the first `needle` at or after `from`.
    pub fn find_char_from(&self, needle: char, from: usize) -> Option<usize> {
        self.chars
            .get(from..)?
            .iter()
            .position(|&c| c == needle)
            .map(|pos| from + pos)
    }
}
