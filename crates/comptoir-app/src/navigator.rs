// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{PageError, TablePage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry<P = TablePage> {
    pub label: String,
    pub icon: String,
    pub accent: String,
    pub page: P,
}

impl<P> PageEntry<P> {
    pub fn new(
        label: impl Into<String>,
        icon: impl Into<String>,
        accent: impl Into<String>,
        page: P,
    ) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            accent: accent.into(),
            page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChanged {
    pub previous: usize,
    pub current: usize,
}

/// Ordered set of pages with exactly one active at a time.
///
/// The active index is the only navigation state; visibility of any entry is derived from
/// it, so there is never a moment where zero or two pages are shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator<P = TablePage> {
    entries: Vec<PageEntry<P>>,
    active: usize,
}

impl<P> Navigator<P> {
    pub fn create(entries: Vec<PageEntry<P>>) -> Result<Self, PageError> {
        if entries.is_empty() {
            return Err(PageError::Configuration(
                "navigator needs at least one page".to_owned(),
            ));
        }
        Ok(Self { entries, active: 0 })
    }

    pub fn select(&mut self, index: usize) -> Result<PageChanged, PageError> {
        if index >= self.entries.len() {
            return Err(PageError::Index {
                index,
                len: self.entries.len(),
            });
        }

        let previous = self.active;
        self.active = index;
        tracing::info!(
            from = %self.entries[previous].label,
            to = %self.entries[index].label,
            "page selected"
        );
        Ok(PageChanged {
            previous,
            current: index,
        })
    }

    pub fn next(&mut self) -> PageChanged {
        self.rotate(1)
    }

    pub fn previous(&mut self) -> PageChanged {
        self.rotate(-1)
    }

    fn rotate(&mut self, delta: isize) -> PageChanged {
        let len = self.entries.len() as isize;
        let next = (self.active as isize + delta).rem_euclid(len) as usize;
        let previous = self.active;
        self.active = next;
        PageChanged {
            previous,
            current: next,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        index == self.active
    }

    pub fn entries(&self) -> &[PageEntry<P>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_entry(&self) -> &PageEntry<P> {
        &self.entries[self.active]
    }

    pub fn active_page(&self) -> &P {
        &self.entries[self.active].page
    }

    pub fn active_page_mut(&mut self) -> &mut P {
        &mut self.entries[self.active].page
    }

    pub fn pages(&self) -> impl Iterator<Item = &P> {
        self.entries.iter().map(|entry| &entry.page)
    }
}
