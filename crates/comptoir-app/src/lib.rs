// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod alert;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod navigator;
pub mod page;
pub mod provider;
pub mod record;
pub mod state;
pub mod workspace;

pub use alert::*;
pub use auth::*;
pub use catalog::*;
pub use error::*;
pub use navigator::*;
pub use page::*;
pub use provider::*;
pub use record::*;
pub use state::*;
pub use workspace::*;
