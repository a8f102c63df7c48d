// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use comptoir_app::{DataProvider, Dataset, PageKind, Record};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Datasets read from a JSON document keyed by page slug:
///
/// ```json
/// { "articles": [ { "Code": "RIZ001", "Stock": 120 } ] }
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonData {
    path: Option<PathBuf>,
    datasets: HashMap<PageKind, Dataset>,
}

impl JsonData {
    pub fn open(path: &Path) -> Result<Self> {
        crate::validate_data_path(&path.to_string_lossy())?;
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read dataset file {}", path.display()))?;
        let mut data =
            Self::parse(&raw).with_context(|| format!("parse dataset file {}", path.display()))?;
        data.path = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            pages = data.datasets.len(),
            "dataset file loaded"
        );
        Ok(data)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("invalid JSON")?;
        let Value::Object(pages) = value else {
            bail!("dataset root must be an object keyed by page name");
        };

        let mut datasets = HashMap::new();
        for (slug, rows) in pages {
            let kind = PageKind::parse(&slug).ok_or_else(|| {
                anyhow!(
                    "unknown page {slug:?}; expected one of: {}",
                    PageKind::ALL.map(PageKind::slug).join(", ")
                )
            })?;
            let Value::Array(rows) = rows else {
                bail!("page {slug:?} must be an array of objects");
            };
            let records = rows
                .into_iter()
                .enumerate()
                .map(|(index, row)| match row {
                    Value::Object(fields) => record_from_fields(&slug, index, fields),
                    _ => bail!("page {slug:?} row {index} must be an object"),
                })
                .collect::<Result<Dataset>>()?;
            datasets.insert(kind, records);
        }

        Ok(Self {
            path: None,
            datasets,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn record_from_fields(slug: &str, index: usize, fields: Map<String, Value>) -> Result<Record> {
    let mut record = Record::new();
    for (key, value) in fields {
        let display = match value {
            Value::Null => String::new(),
            Value::String(text) => text,
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
            Value::Array(_) | Value::Object(_) => bail!(
                "page {slug:?} row {index} field {key:?} must be a string, number, bool or null"
            ),
        };
        record.insert(key, display);
    }
    Ok(record)
}

impl DataProvider for JsonData {
    fn load_dataset(&mut self, kind: PageKind) -> Result<Dataset> {
        Ok(self.datasets.get(&kind).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::JsonData;
    use anyhow::Result;
    use comptoir_app::{DataProvider, PageKind};

    #[test]
    fn scalars_render_as_display_text() -> Result<()> {
        let mut data = JsonData::parse(
            r#"{"articles":[{"Code":"RIZ001","Stock":120,"Actif":true,"Prix":null}]}"#,
        )?;
        let rows = data.load_dataset(PageKind::Articles)?;
        assert_eq!(rows[0].display("Stock"), "120");
        assert_eq!(rows[0].display("Actif"), "true");
        assert_eq!(rows[0].get("Prix"), Some(""));
        Ok(())
    }

    #[test]
    fn object_key_order_is_kept() -> Result<()> {
        let mut data = JsonData::parse(r#"{"clients":[{"Solde":"0","Nom":"Awa","Tel":"1"}]}"#)?;
        let rows = data.load_dataset(PageKind::Clients)?;
        let keys = rows[0].fields().map(|(key, _)| key).collect::<Vec<_>>();
        assert_eq!(keys, vec!["Solde", "Nom", "Tel"]);
        Ok(())
    }

    #[test]
    fn nested_values_are_rejected_with_location() {
        let error = JsonData::parse(r#"{"clients":[{"Nom":"Awa"},{"Nom":["x"]}]}"#)
            .expect_err("nested value should fail");
        let message = error.to_string();
        assert!(message.contains("row 1"), "{message}");
        assert!(message.contains("\"Nom\""), "{message}");
    }

    #[test]
    fn root_must_be_object() {
        let error = JsonData::parse("[]").expect_err("array root should fail");
        assert!(error.to_string().contains("keyed by page name"));
    }
}
