//! Transient message value handed to the toast surface.

use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Identifier assigned to every dispatched toast.
pub type ToastId = Uuid;

/// Visual variant of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
    /// Neutral toast; usually carries its own icon.
    Blank,
}

impl ToastKind {
    /// Display time used when a preset does not override it.
    pub fn default_duration(self) -> Duration {
        match self {
            Self::Success => Duration::from_millis(2000),
            Self::Error | Self::Blank => Duration::from_millis(4000),
        }
    }
}

/// Custom colors for emphasized toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToastStyle {
    pub background: &'static str,
    pub color: &'static str,
    pub bold: bool,
}

impl ToastStyle {
    pub const fn bold_on(background: &'static str) -> Self {
        Self {
            background,
            color: "#fff",
            bold: true,
        }
    }
}

/// Fully resolved toast ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
    pub icon: Option<&'static str>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub style: Option<ToastStyle>,
}

fn serialize_millis<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
}
