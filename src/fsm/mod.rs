//! Onboarding state machine.
//!
//! ```text
//!  Idle ──▶ Scanning ──▶ Found ──▶ Connecting ──▶ Done(Success)
//!   │          │                       │
//!   └──────────┴───────────────────────┴────────▶ Done(Failure)
//! ```
//!
//! `Scanning → Scanning` is the scan retry loop and is not recorded as a
//! transition.  Nothing leaves `Done`; a new attempt starts a new
//! [`OnboardingFsm`].

use log::info;

/// How an attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingState {
    Idle,
    Scanning,
    Found,
    Connecting,
    Done(Outcome),
}

impl OnboardingState {
    /// Whether `self → next` is an edge of the onboarding graph.
    pub fn can_transition_to(self, next: Self) -> bool {
        use OnboardingState::{Connecting, Done, Found, Idle, Scanning};
        matches!(
            (self, next),
            (Idle, Scanning)
                | (Idle | Scanning | Connecting, Done(Outcome::Failure))
                | (Scanning, Found)
                | (Found, Connecting)
                | (Connecting, Done(Outcome::Success))
        )
    }

    pub fn is_done(self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Longest possible path through the graph.
pub const MAX_TRACE: usize = 5;

/// Tracks the current state of one attempt and the path taken so far.
#[derive(Debug, Clone)]
pub struct OnboardingFsm {
    trace: heapless::Vec<OnboardingState, MAX_TRACE>,
}

impl Default for OnboardingFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingFsm {
    pub fn new() -> Self {
        let mut trace = heapless::Vec::new();
        // Capacity is non-zero, first push cannot fail.
        let _ = trace.push(OnboardingState::Idle);
        Self { trace }
    }

    pub fn current(&self) -> OnboardingState {
        self.trace.last().copied().unwrap_or(OnboardingState::Idle)
    }

    /// Move to `next`.  Illegal edges are a programming error: they trip a
    /// debug assertion and are ignored in release builds.
    pub fn transition(&mut self, next: OnboardingState) {
        let from = self.current();
        if !from.can_transition_to(next) {
            debug_assert!(false, "illegal onboarding transition {from:?} -> {next:?}");
            return;
        }
        info!("Onboarding transition: {:?} -> {:?}", from, next);
        // Every legal path fits in MAX_TRACE.
        let _ = self.trace.push(next);
    }

    /// States visited, starting with `Idle`.
    pub fn trace(&self) -> &[OnboardingState] {
        &self.trace
    }
}
