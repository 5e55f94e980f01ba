use super::Document;

pub const PAGE_SIZE: usize = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSlice {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl PageSlice {
    fn empty(at: usize) -> Self {
        Self {
            text: String::new(),
            start: at,
            end: at,
        }
    }
}

pub fn total_pages(document: &Document) -> usize {
    document.len().div_ceil(PAGE_SIZE)
}

/// 1-based page holding the character at `offset`.
pub fn page_for_offset(offset: usize) -> usize {
    offset / PAGE_SIZE + 1
}

/// Page `index` (1-based). Starts at `(index-1)*PAGE_SIZE`; the end is pushed
/// forward to the next space so no word is cut. The start is never pulled
/// back to the previous page's adjusted end, so neighbouring pages overlap
/// whenever an end was pushed.
pub fn page(document: &Document, index: usize) -> PageSlice {
    let len = document.len();
    if index == 0 || index > total_pages(document) {
        return PageSlice::empty(len);
    }
    let start = (index - 1) * PAGE_SIZE;
    let mut end = (index * PAGE_SIZE).min(len);
    if end < len {
        end = document.find_char_from(' ', end).unwrap_or(len);
    }
    PageSlice {
        text: document.slice(start, end),
        start,
        end,
    }
}

/// Whether a space follows the naive end of page `index`; forward paging
/// is only allowed when it does.
pub fn has_page_after(document: &Document, index: usize) -> bool {
    index < total_pages(document) && document.find_char_from(' ', index * PAGE_SIZE).is_some()
}
