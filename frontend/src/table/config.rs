use crate::models::Comment;

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Text,
    Sentiment,
    Source,
}

impl SortColumn {
    pub fn display_name(&self) -> &'static str {
        match self {
            SortColumn::Text => "Comment",
            SortColumn::Sentiment => "Sentiment",
            SortColumn::Source => "Type",
        }
    }

    pub fn key<'a>(&self, comment: &'a Comment) -> &'a str {
        match self {
            SortColumn::Text => &comment.text,
            SortColumn::Sentiment => comment.sentiment.label(),
            SortColumn::Source => comment.source.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Table settings driven by the user. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub search_text: String,
    pub sort_column: Option<SortColumn>,
    pub sort_direction: SortDirection,
    pub page_size: usize,
    pub current_page: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            sort_column: None,
            sort_direction: SortDirection::Asc,
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
        }
    }
}

impl ViewConfig {
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    pub fn effective_page(&self) -> usize {
        self.current_page.max(1)
    }

    pub fn set_search_text(&mut self, search_text: impl Into<String>) {
        self.search_text = search_text.into();
        self.current_page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Same column flips the direction, a new column starts ascending.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.sort_column == Some(column) {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_column = Some(column);
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn sort_indicator(&self, column: SortColumn) -> Option<&'static str> {
        (self.sort_column == Some(column)).then(|| self.sort_direction.arrow())
    }

    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to_page(self.effective_page() + 1, total_pages);
    }

    pub fn previous_page(&mut self, total_pages: usize) {
        self.go_to_page(self.effective_page().saturating_sub(1), total_pages);
    }

    /// Pulls `current_page` back into range after the filtered set shrank.
    /// Returns whether anything changed.
    pub fn clamp_page(&mut self, filtered_count: usize) -> bool {
        let total_pages = super::view::total_pages(filtered_count, self.effective_page_size());
        let clamped = self.current_page.clamp(1, total_pages);
        let changed = clamped != self.current_page;
        self.current_page = clamped;
        changed
    }
}
