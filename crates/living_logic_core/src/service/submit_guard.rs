//! In-flight guard for form submits.

use std::sync::atomic::{AtomicBool, Ordering};

/// Admits one submission at a time.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    in_flight: AtomicBool,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard, or returns `None` while another submit holds it.
    pub fn try_begin(&self) -> Option<SubmitTicket<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitTicket { guard: self })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Releases the guard on drop.
#[derive(Debug)]
pub struct SubmitTicket<'a> {
    guard: &'a SubmitGuard,
}

impl Drop for SubmitTicket<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::SubmitGuard;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn second_claim_is_rejected_until_release() {
        let guard = SubmitGuard::new();
        let ticket = guard.try_begin().expect("first claim");
        assert!(guard.is_in_flight());
        assert!(guard.try_begin().is_none());

        drop(ticket);
        assert!(!guard.is_in_flight());
        assert!(guard.try_begin().is_some());
    }

    #[test]
    fn concurrent_claims_admit_exactly_one() {
        const WORKERS: usize = 8;
        let guard = Arc::new(SubmitGuard::new());
        let admitted = Arc::new(AtomicUsize::new(0));
        let start = Arc::new(Barrier::new(WORKERS));
        let attempted = Arc::new(Barrier::new(WORKERS));

        let handles = (0..WORKERS)
            .map(|_| {
                let guard = Arc::clone(&guard);
                let admitted = Arc::clone(&admitted);
                let start = Arc::clone(&start);
                let attempted = Arc::clone(&attempted);
                thread::spawn(move || {
                    start.wait();
                    let ticket = guard.try_begin();
                    if ticket.is_some() {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                    // Hold any ticket until every worker has tried.
                    attempted.wait();
                    drop(ticket);
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().expect("worker thread");
        }
        assert_eq!(admitted.load(Ordering::SeqCst), 1);
        assert!(!guard.is_in_flight());
    }
}
