use serde::{Deserialize, Serialize};

/// Something the user should see after an action.
/// Independent of logging: every notice is also traced where it is raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(t) | Notice::Info(t) | Notice::Warning(t) | Notice::Error(t) => t,
        }
    }

    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::Success(_) => NoticeLevel::Success,
            Notice::Info(_) => NoticeLevel::Info,
            Notice::Warning(_) => NoticeLevel::Warning,
            Notice::Error(_) => NoticeLevel::Error,
        }
    }
}

/// Severity of a `Notice`; keys the UI colour table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub const ALL: [NoticeLevel; 4] = [
        NoticeLevel::Success,
        NoticeLevel::Info,
        NoticeLevel::Warning,
        NoticeLevel::Error,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NoticeLevel::Success => "Success",
            NoticeLevel::Info => "Info",
            NoticeLevel::Warning => "Warning",
            NoticeLevel::Error => "Error",
        }
    }
}
