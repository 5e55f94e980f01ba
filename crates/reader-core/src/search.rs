use crate::layout::{page_for_offset, Document};

/// Ascending start offsets of `query` in `document`, ignoring case.
pub fn find_matches(document: &Document, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle: Vec<char> = query.chars().collect();
    highlight::find_all(document.chars(), &needle)
}

#[derive(Clone, Debug, Default)]
pub struct SearchState {
    query: String,
    matches: Vec<usize>,
    cursor: Option<usize>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// Index of the reported match, `None` when there are no matches.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty() && !self.matches.is_empty()
    }

    pub fn update(&mut self, document: &Document, query: &str) {
        self.query = query.to_string();
        self.rescan(document);
    }

    pub fn rescan(&mut self, document: &Document) {
        self.matches = find_matches(document, &self.query);
        self.cursor = if self.matches.is_empty() { None } else { Some(0) };
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.cursor = None;
    }

    /// Moves the cursor forward (wrapping) and returns the page to show.
    /// The page comes from the match the cursor was on before moving, so the
    /// shown page trails the reported match by one step.
    pub fn next(&mut self) -> Option<usize> {
        let previous = self.cursor?;
        let count = self.matches.len();
        self.cursor = Some((previous + 1) % count);
        Some(page_for_offset(self.matches[previous]))
    }

    /// Backward counterpart of [`SearchState::next`], same trailing page.
    pub fn prev(&mut self) -> Option<usize> {
        let previous = self.cursor?;
        let count = self.matches.len();
        self.cursor = Some((previous + count - 1) % count);
        Some(page_for_offset(self.matches[previous]))
    }

    pub fn counter_label(&self) -> Option<String> {
        self.cursor
            .map(|c| format!("{} of {}", c + 1, self.matches.len()))
    }
}
