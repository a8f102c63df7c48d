// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{ColumnSpec, Dataset, PageError, Record};

/// Search text plus the row-visibility mask derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    search: String,
    visible: Vec<bool>,
}

impl FilterState {
    fn showing_all(row_count: usize) -> Self {
        Self {
            search: String::new(),
            visible: vec![true; row_count],
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_visible(&self, row: usize) -> bool {
        self.visible.get(row).copied().unwrap_or(false)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|visible| **visible).count()
    }

    fn recompute(&mut self, search: &str, rows: &[Record], columns: &ColumnSpec) {
        let needle = search.to_lowercase();
        self.search = search.to_owned();
        self.visible = rows
            .iter()
            .map(|row| row_matches(row, columns, &needle))
            .collect();
    }
}

/// `needle` must already be lowercased. Matching is a plain substring test.
pub fn row_matches(row: &Record, columns: &ColumnSpec, needle: &str) -> bool {
    needle.is_empty()
        || columns
            .keys()
            .any(|key| row.display(key).to_lowercase().contains(needle))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub page_title: String,
}

/// Receives "add new record" requests raised from a page.
pub trait CreateSink {
    fn create_requested(&mut self, request: &CreateRequest);
}

/// A titled, searchable table over one dataset snapshot.
///
/// The dataset and column projection are fixed for the lifetime of the page. Only the
/// search text and the alert flags change after construction, and neither touches the
/// stored records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage {
    title: String,
    columns: ColumnSpec,
    rows: Dataset,
    filter: FilterState,
    flags: Vec<bool>,
}

impl TablePage {
    pub fn create(
        title: impl Into<String>,
        rows: Dataset,
        columns: ColumnSpec,
    ) -> Result<Self, PageError> {
        let title = title.into();
        if columns.is_empty() {
            return Err(PageError::Configuration(format!(
                "page {title:?} needs at least one column"
            )));
        }

        let row_count = rows.len();
        Ok(Self {
            title,
            columns,
            rows,
            filter: FilterState::showing_all(row_count),
            flags: vec![false; row_count],
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn columns(&self) -> &ColumnSpec {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn search(&self) -> &str {
        self.filter.search()
    }

    pub fn set_search(&mut self, text: &str) {
        self.filter.recompute(text, &self.rows, &self.columns);
        tracing::debug!(
            page = %self.title,
            search = text,
            visible = self.filter.visible_count(),
            "filter recomputed"
        );
    }

    pub fn visible_count(&self) -> usize {
        self.filter.visible_count()
    }

    pub fn visible_row_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows.len()).filter(|row| self.filter.is_visible(*row))
    }

    /// Rows passing the current search, in dataset order. Each call starts over.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Record> + '_ {
        self.visible_row_indices().map(|row| &self.rows[row])
    }

    pub fn cell(&self, row: usize, key: &str) -> &str {
        self.rows.get(row).map_or("", |record| record.display(key))
    }

    /// Cells of `row` in column order.
    pub fn projected_cells(&self, row: usize) -> Vec<&str> {
        self.columns.keys().map(|key| self.cell(row, key)).collect()
    }

    pub fn is_flagged(&self, row: usize) -> bool {
        self.flags.get(row).copied().unwrap_or(false)
    }

    pub fn flagged_count(&self) -> usize {
        self.flags.iter().filter(|flagged| **flagged).count()
    }

    pub fn clear_alerts(&mut self) {
        self.flags.iter_mut().for_each(|flag| *flag = false);
    }

    pub(crate) fn flag_row(&mut self, row: usize) {
        if let Some(flag) = self.flags.get_mut(row) {
            *flag = true;
        }
    }

    pub fn request_create(&self, sink: &mut dyn CreateSink) {
        tracing::info!(page = %self.title, "create requested");
        sink.create_requested(&CreateRequest {
            page_title: self.title.clone(),
        });
    }
}
