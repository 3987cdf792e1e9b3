//! Form-level notices
//!
//! Messages shown without being anchored to one input field.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormNotice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl FormNotice {
    pub const GENERIC_FAILURE: &'static str = "Something went wrong. Please try again.";

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, title: title.into(), message: message.into() }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, title: title.into(), message: message.into() }
    }

    /// Notice for failures that carry no usable message
    pub fn unexpected(title: impl Into<String>) -> Self {
        Self::error(title, Self::GENERIC_FAILURE)
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
