// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::{Dataset, PageKind};

/// Source of the records shown on each page. A provider with nothing for `kind`
/// returns an empty dataset rather than an error.
pub trait DataProvider {
    fn load_dataset(&mut self, kind: PageKind) -> Result<Dataset>;
}
