// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use comptoir_app::{
    CreateRequest, CreateSink, Credentials, UserInfo, Workspace, WorkspaceOptions, authenticate,
};
use comptoir_data::{JsonData, SampleData};
use std::path::PathBuf;

use crate::config::Config;

pub struct ShopRuntime {
    expected: Credentials,
    user: UserInfo,
    options: WorkspaceOptions,
    data_path: Option<PathBuf>,
    skip_login: bool,
    create_requests: Vec<CreateRequest>,
}

impl ShopRuntime {
    pub fn new(config: &Config, data_path: Option<PathBuf>) -> Self {
        Self {
            expected: config.credentials(),
            user: config.user(),
            options: config.workspace_options(),
            data_path,
            skip_login: config.skip_login(),
            create_requests: Vec::new(),
        }
    }

    pub fn build_workspace(&self) -> Result<Workspace> {
        match &self.data_path {
            Some(path) => {
                let mut data = JsonData::open(path).with_context(|| {
                    format!(
                        "open dataset {} -- if this path is wrong, set [data].path or COMPTOIR_DATA_PATH",
                        path.display()
                    )
                })?;
                Workspace::build(&mut data, &self.options)
            }
            None => Workspace::build(&mut SampleData::new(), &self.options),
        }
    }
}

impl CreateSink for ShopRuntime {
    fn create_requested(&mut self, request: &CreateRequest) {
        // No record editor exists yet; the request is only recorded.
        tracing::info!(
            page = %request.page_title,
            pending = self.create_requests.len() + 1,
            "create request received"
        );
        self.create_requests.push(request.clone());
    }
}

impl comptoir_tui::AppRuntime for ShopRuntime {
    fn authenticate(&mut self, credentials: &Credentials) -> Result<UserInfo> {
        Ok(authenticate(credentials, &self.expected, &self.user)?)
    }

    fn load_workspace(&mut self) -> Result<Workspace> {
        self.build_workspace()
    }

    fn skip_login(&mut self) -> Option<UserInfo> {
        self.skip_login.then(|| self.user.clone())
    }
}
