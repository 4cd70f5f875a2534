//! RunController - process-wide dispatch switch.
//!
//! A two-state machine {Stopped, Running} on a single atomic flag.
//! Handlers flip it, the dispatch loop reads it on every tick, so the
//! flag must never be a bare bool shared across tasks.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    NotRunning,
}

/// Enable/disable switch for the dispatch loop. Starts disabled.
///
/// Both operations are idempotent edges: repeating `start` while
/// Running stays Running and reports `AlreadyRunning`; neither ever
/// errors. `swap` makes each edge a single atomic read-modify-write,
/// so concurrent callers observe a consistent outcome.
#[derive(Debug, Default)]
pub struct RunController {
    enabled: AtomicBool,
}

impl RunController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> StartOutcome {
        if self.enabled.swap(true, Ordering::AcqRel) {
            StartOutcome::AlreadyRunning
        } else {
            StartOutcome::Started
        }
    }

    pub fn stop(&self) -> StopOutcome {
        if self.enabled.swap(false, Ordering::AcqRel) {
            StopOutcome::Stopped
        } else {
            StopOutcome::NotRunning
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disabled() {
        let controller = RunController::new();
        assert!(!controller.is_enabled());
    }

    #[test]
    fn start_twice_reports_already_running() {
        let controller = RunController::new();

        assert_eq!(controller.start(), StartOutcome::Started);
        assert!(controller.is_enabled());
        assert_eq!(controller.start(), StartOutcome::AlreadyRunning);
        assert!(controller.is_enabled());
    }

    #[test]
    fn stop_before_start_reports_not_running() {
        let controller = RunController::new();

        assert_eq!(controller.stop(), StopOutcome::NotRunning);
        assert!(!controller.is_enabled());
    }

    #[test]
    fn start_stop_round_trip() {
        let controller = RunController::new();

        assert_eq!(controller.start(), StartOutcome::Started);
        assert_eq!(controller.stop(), StopOutcome::Stopped);
        assert!(!controller.is_enabled());
        assert_eq!(controller.stop(), StopOutcome::NotRunning);
    }

    #[test]
    fn concurrent_starts_yield_exactly_one_started() {
        use std::sync::Arc;

        let controller = Arc::new(RunController::new());
        let mut joins = Vec::new();
        for _ in 0..8 {
            let controller = Arc::clone(&controller);
            joins.push(std::thread::spawn(move || controller.start()));
        }

        let started = joins
            .into_iter()
            .map(|j| j.join().unwrap())
            .filter(|outcome| *outcome == StartOutcome::Started)
            .count();
        assert_eq!(started, 1);
        assert!(controller.is_enabled());
    }
}
