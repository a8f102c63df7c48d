// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Record, TablePage};

pub type ParseFn = fn(&str) -> Option<i64>;

/// Flags rows whose `column` parses below `threshold`.
#[derive(Debug, Clone)]
pub struct AlertRule {
    pub column: String,
    pub threshold: i64,
    pub parse: ParseFn,
}

impl AlertRule {
    pub fn below(column: impl Into<String>, threshold: i64) -> Self {
        Self {
            column: column.into(),
            threshold,
            parse: parse_display_integer,
        }
    }

    pub fn with_parser(mut self, parse: ParseFn) -> Self {
        self.parse = parse;
        self
    }

    pub fn flags(&self, record: &Record) -> bool {
        record
            .get(&self.column)
            .and_then(self.parse)
            .is_some_and(|value| value < self.threshold)
    }
}

/// Marks rows of the full, unfiltered dataset. Existing flags are kept, so several
/// rules can be layered on one page.
pub fn apply_alerts(page: &mut TablePage, rule: &AlertRule) {
    let flagged = page
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, record)| rule.flags(record))
        .map(|(row, _)| row)
        .collect::<Vec<_>>();

    for row in &flagged {
        page.flag_row(*row);
    }
    tracing::debug!(
        page = %page.title(),
        column = %rule.column,
        threshold = rule.threshold,
        flagged = flagged.len(),
        "alerts applied"
    );
}

/// Reads an integer out of display text, ignoring every non-digit character so that
/// "25 000", "25,000" and "25.000" all read as 25000. A leading '-' keeps the sign.
pub fn parse_display_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let negative = trimmed.starts_with('-');
    let digits = trimmed
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}
