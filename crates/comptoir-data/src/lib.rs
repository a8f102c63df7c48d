// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod json;
mod sample;

use anyhow::{Result, bail};

pub use json::JsonData;
pub use sample::SampleData;

pub const APP_NAME: &str = "comptoir";

pub fn validate_data_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        bail!("dataset path must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "dataset path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("dataset path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    Ok(())
}
