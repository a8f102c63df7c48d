// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::UserInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Workspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub screen: Screen,
    pub mode: AppMode,
    pub user: Option<UserInfo>,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Login,
            mode: AppMode::Nav,
            user: None,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SignIn(UserInfo),
    SignOut,
    EnterSearch,
    ExitSearch,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ScreenChanged(Screen),
    ModeChanged(AppMode),
    SignedIn(UserInfo),
    SignedOut,
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SignIn(user) => {
                let greeting = format!("bienvenue {}", user.full_name);
                self.user = Some(user.clone());
                self.screen = Screen::Workspace;
                self.mode = AppMode::Nav;
                vec![
                    AppEvent::SignedIn(user),
                    AppEvent::ScreenChanged(self.screen),
                    self.set_status(&greeting),
                ]
            }
            AppCommand::SignOut => {
                self.user = None;
                self.screen = Screen::Login;
                self.mode = AppMode::Nav;
                vec![
                    AppEvent::SignedOut,
                    AppEvent::ScreenChanged(self.screen),
                    self.set_status("signed out"),
                ]
            }
            AppCommand::EnterSearch => {
                if self.screen != Screen::Workspace {
                    return Vec::new();
                }
                self.mode = AppMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitSearch => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
