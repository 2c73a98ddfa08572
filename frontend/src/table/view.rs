use super::config::{SortColumn, SortDirection, ViewConfig};
use crate::models::Comment;
use std::cmp::Ordering;

/// One page of the table plus what the pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub rows: Vec<Comment>,
    pub total_pages: usize,
    pub filtered_count: usize,
}

impl TableView {
    /// An empty page is shown as "no data", never as a blank table.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn compute_view(records: &[Comment], config: &ViewConfig) -> TableView {
    let mut filtered = filter_records(records, &config.search_text);
    if let Some(column) = config.sort_column {
        sort_records(&mut filtered, column, config.sort_direction);
    }

    let page_size = config.effective_page_size();
    let filtered_count = filtered.len();
    let start = (config.effective_page() - 1).saturating_mul(page_size);

    let rows = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    TableView {
        rows,
        total_pages: total_pages(filtered_count, page_size),
        filtered_count,
    }
}

/// Case-insensitive substring match on text, sentiment label or source tag.
pub fn filter_records<'a>(records: &'a [Comment], search_text: &str) -> Vec<&'a Comment> {
    if search_text.is_empty() {
        return records.iter().collect();
    }

    let needle = search_text.to_lowercase();
    records
        .iter()
        .filter(|comment| {
            comment.text.to_lowercase().contains(&needle)
                || comment.sentiment.label().to_lowercase().contains(&needle)
                || comment.source.label().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Stable in both directions: equal keys keep their input order.
pub fn sort_records(records: &mut [&Comment], column: SortColumn, direction: SortDirection) {
    records.sort_by(|a, b| compare(column.key(a), column.key(b), direction));
}

fn compare(a: &str, b: &str, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => a.cmp(b),
        SortDirection::Desc => b.cmp(a),
    }
}

pub fn total_pages(filtered_count: usize, page_size: usize) -> usize {
    filtered_count.div_ceil(page_size.max(1)).max(1)
}
