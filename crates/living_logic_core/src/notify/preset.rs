//! Named toast presets used by the site's pages.
//!
//! Callers pick a preset by intent; message text, icon, duration and style
//! are fixed here and never composed at call sites.

use super::toast::{Toast, ToastKind, ToastStyle};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

const LOCK_ICON: &str = "🔒";
const INFO_ICON: &str = "ℹ️";
const LOCK_STYLE: ToastStyle = ToastStyle::bold_on("#1f2937");
const SUCCESS_STYLE: ToastStyle = ToastStyle::bold_on("#065f46");
const REVIEW_STYLE: ToastStyle = ToastStyle::bold_on("#1d4ed8");
const LOCK_DURATION: Duration = Duration::from_millis(4000);
const NOTICE_DURATION: Duration = Duration::from_millis(5000);

/// Outcome announcements, selected by intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "preset", content = "text", rename_all = "snake_case")]
pub enum ToastPreset {
    ContactSent,
    BookingConfirmed,
    NewsletterSubscribed,
    SignupComplete,
    /// Generic failure with a caller-chosen message.
    Error(String),
    LoginRequiresSignup,
    ContentRequiresLogin,
    PlanRequiresLogin,
    SlotRequiresLogin,
    PasswordResetRequested,
    AccountUnderReview,
    Success(String),
    Info(String),
    /// "Thank you for {context}, we will contact you soon".
    FormSuccess(String),
}

impl ToastPreset {
    /// Resolves the preset into a displayable toast with a fresh id.
    pub fn to_toast(&self) -> Toast {
        let (kind, message, icon, duration, style) = match self {
            Self::ContactSent => success("Thank you for contacting us, we will contact you soon"),
            Self::BookingConfirmed => success("Thank you for booking, we will contact you soon"),
            Self::SignupComplete => success("Thank you for signup, we will contact you soon"),
            Self::NewsletterSubscribed => (
                ToastKind::Blank,
                "Thank you for subscribing us we will contact you soon".to_string(),
                Some("📧"),
                NOTICE_DURATION,
                Some(SUCCESS_STYLE),
            ),
            Self::Error(message) => (
                ToastKind::Error,
                message.clone(),
                None,
                ToastKind::Error.default_duration(),
                None,
            ),
            Self::LoginRequiresSignup => (
                ToastKind::Blank,
                "Please signup".to_string(),
                Some(INFO_ICON),
                ToastKind::Blank.default_duration(),
                None,
            ),
            Self::ContentRequiresLogin => locked("Login first for reading article"),
            Self::PlanRequiresLogin => locked("Login first to go with the plan"),
            Self::SlotRequiresLogin => locked("Login first to grab your preferred slot"),
            Self::PasswordResetRequested => (
                ToastKind::Blank,
                "Your reset password request is placed successfull and will receive an reset link in your email"
                    .to_string(),
                None,
                NOTICE_DURATION,
                Some(SUCCESS_STYLE),
            ),
            Self::AccountUnderReview => (
                ToastKind::Blank,
                "Your account is under review we will get back soon".to_string(),
                Some("⏳"),
                NOTICE_DURATION,
                Some(REVIEW_STYLE),
            ),
            Self::Success(message) => success(message),
            Self::Info(message) => (
                ToastKind::Blank,
                message.clone(),
                Some(INFO_ICON),
                ToastKind::Blank.default_duration(),
                None,
            ),
            Self::FormSuccess(context) => {
                success(&format!("Thank you for {context}, we will contact you soon"))
            }
        };

        Toast {
            id: Uuid::new_v4(),
            kind,
            message,
            icon,
            duration,
            style,
        }
    }

    /// Whether the preset reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

type Parts = (
    ToastKind,
    String,
    Option<&'static str>,
    Duration,
    Option<ToastStyle>,
);

fn success(message: &str) -> Parts {
    (
        ToastKind::Success,
        message.to_string(),
        None,
        ToastKind::Success.default_duration(),
        None,
    )
}

fn locked(message: &str) -> Parts {
    (
        ToastKind::Blank,
        message.to_string(),
        Some(LOCK_ICON),
        LOCK_DURATION,
        Some(LOCK_STYLE),
    )
}
