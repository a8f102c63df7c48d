// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};

use crate::{
    DEFAULT_STOCK_THRESHOLD, DataProvider, Navigator, PageEntry, PageKind, TablePage, apply_alerts,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceOptions {
    pub stock_threshold: i64,
    pub start_page: PageKind,
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self {
            stock_threshold: DEFAULT_STOCK_THRESHOLD,
            start_page: PageKind::Sales,
        }
    }
}

/// Every catalog page, populated and decorated, behind one navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub navigator: Navigator<TablePage>,
}

impl Workspace {
    pub fn build(provider: &mut dyn DataProvider, options: &WorkspaceOptions) -> Result<Self> {
        let mut entries = Vec::with_capacity(PageKind::ALL.len());
        for kind in PageKind::ALL {
            let rows = provider
                .load_dataset(kind)
                .with_context(|| format!("load {} dataset", kind.slug()))?;
            let mut page = TablePage::create(kind.title(), rows, kind.columns())?;
            if let Some(rule) = kind.alert_rule(options.stock_threshold) {
                apply_alerts(&mut page, &rule);
            }
            entries.push(PageEntry::new(
                kind.label(),
                kind.icon(),
                kind.accent(),
                page,
            ));
        }

        let mut navigator = Navigator::create(entries)?;
        navigator.select(options.start_page.index())?;
        Ok(Self { navigator })
    }

    pub fn active_kind(&self) -> PageKind {
        PageKind::ALL
            .get(self.navigator.active_index())
            .copied()
            .unwrap_or(PageKind::Sales)
    }

    pub fn flagged_total(&self) -> usize {
        self.navigator
            .pages()
            .map(TablePage::flagged_count)
            .sum()
    }
}
