//! In-flight guard for strict refresh mode

use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether a request for one endpoint is still unresolved
#[derive(Debug, Default)]
pub struct InFlightGuard {
    busy: AtomicBool,
}

/// Held while a guarded request is in flight; releases the guard on drop
#[derive(Debug)]
pub struct InFlightPermit<'a> {
    guard: &'a InFlightGuard,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the guard, or `None` if a previous permit is still alive
    pub fn try_acquire(&self) -> Option<InFlightPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightPermit { guard: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlightPermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_until_release() {
        let guard = InFlightGuard::new();

        let permit = guard.try_acquire().unwrap();
        assert!(guard.is_busy());
        assert!(guard.try_acquire().is_none());

        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_some());
    }
}
