//! Notification dispatch.
//!
//! # Responsibility
//! - Resolve outcome presets into toasts and hand them to a display surface.
//! - Keep dispatch fire-and-forget for business logic.
//!
//! # Invariants
//! - Dispatch never fails from the caller's point of view; sink faults are
//!   logged and dropped.
//! - Several toasts may be visible at once, each on its own timer.
//! - No de-duplication is performed.

pub mod preset;
pub mod toast;

use log::{info, warn};
use preset::ToastPreset;
use std::cell::RefCell;
use std::time::Instant;
use toast::{Toast, ToastId, ToastKind};

/// Transient-message surface that displays toasts.
pub trait ToastSink {
    /// Shows `toast`; returns a description of the fault on failure.
    fn show(&self, toast: Toast) -> Result<(), String>;
}

impl<K: ToastSink + ?Sized> ToastSink for &K {
    fn show(&self, toast: Toast) -> Result<(), String> {
        (**self).show(toast)
    }
}

/// Dispatches presets to a sink.
pub struct Notifier<K: ToastSink> {
    sink: K,
}

impl<K: ToastSink> Notifier<K> {
    pub fn new(sink: K) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Resolves and shows `preset`, returning the id of the dispatched toast.
    pub fn dispatch(&self, preset: &ToastPreset) -> ToastId {
        let toast = preset.to_toast();
        let id = toast.id;
        if let Err(err) = self.sink.show(toast) {
            warn!(
                "event=toast_dispatch module=notify status=error toast_id={} error={}",
                id, err
            );
        }
        id
    }
}

/// Records toasts with their display time.
#[derive(Debug, Default)]
pub struct MemoryToastSink {
    shown: RefCell<Vec<(Instant, Toast)>>,
}

impl MemoryToastSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every toast shown so far, oldest first.
    pub fn shown(&self) -> Vec<Toast> {
        self.shown
            .borrow()
            .iter()
            .map(|(_, toast)| toast.clone())
            .collect()
    }

    pub fn last(&self) -> Option<Toast> {
        self.shown.borrow().last().map(|(_, toast)| toast.clone())
    }

    /// Toasts whose auto-dismiss timer has not elapsed at `at`.
    pub fn visible_at(&self, at: Instant) -> Vec<Toast> {
        self.shown
            .borrow()
            .iter()
            .filter(|(shown_at, toast)| at.saturating_duration_since(*shown_at) < toast.duration)
            .map(|(_, toast)| toast.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.shown.borrow_mut().clear();
    }
}

impl ToastSink for MemoryToastSink {
    fn show(&self, toast: Toast) -> Result<(), String> {
        self.shown.borrow_mut().push((Instant::now(), toast));
        Ok(())
    }
}

/// Writes toasts to the log; used where no UI surface is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogToastSink;

impl ToastSink for LogToastSink {
    fn show(&self, toast: Toast) -> Result<(), String> {
        let status = match toast.kind {
            ToastKind::Error => "error",
            ToastKind::Success | ToastKind::Blank => "ok",
        };
        info!(
            "event=toast_shown module=notify status={} toast_id={} duration_ms={} message={}",
            status,
            toast.id,
            toast.duration.as_millis(),
            toast.message
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryToastSink, Notifier, ToastSink};
    use crate::notify::preset::ToastPreset;
    use crate::notify::toast::Toast;
    use std::time::{Duration, Instant};

    struct BrokenSink;

    impl ToastSink for BrokenSink {
        fn show(&self, _toast: Toast) -> Result<(), String> {
            Err("surface detached".to_string())
        }
    }

    #[test]
    fn dispatch_forwards_resolved_toast() {
        let notifier = Notifier::new(MemoryToastSink::new());
        let id = notifier.dispatch(&ToastPreset::BookingConfirmed);

        let last = notifier.sink().last().expect("toast recorded");
        assert_eq!(last.id, id);
        assert_eq!(
            last.message,
            "Thank you for booking, we will contact you soon"
        );
    }

    #[test]
    fn sink_failure_is_swallowed() {
        let notifier = Notifier::new(BrokenSink);
        notifier.dispatch(&ToastPreset::ContactSent);
    }

    #[test]
    fn toasts_expire_independently() {
        let sink = MemoryToastSink::new();
        let notifier = Notifier::new(&sink);
        notifier.dispatch(&ToastPreset::ContactSent);
        notifier.dispatch(&ToastPreset::AccountUnderReview);
        notifier.dispatch(&ToastPreset::ContactSent);

        let now = Instant::now();
        assert_eq!(sink.visible_at(now).len(), 3);

        let later = now + Duration::from_millis(3000);
        let visible = sink.visible_at(later);
        assert_eq!(visible.len(), 1);
        assert_eq!(
            visible[0].message,
            "Your account is under review we will get back soon"
        );

        assert!(sink.visible_at(now + Duration::from_secs(6)).is_empty());
    }
}
