//! Vault lock invocation and outcome handling.
//!
//! Locking is asynchronous: invoking produces a [`LockTicket`] that travels to
//! the worker with the request and comes back with the outcome. The ticket
//! records the mount generation that issued it, so an outcome arriving after
//! the bar was unmounted (or remounted) is recognised and its navigation
//! suppressed. The request itself is never cancelled and never retried.

use serde::{Deserialize, Serialize};

/// Identifies one lock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockTicket {
    /// Mount generation of the bar that issued the request.
    pub generation: u64,
    /// Per-bar sequence number of the request.
    pub sequence: u64,
}

/// Result of the external lock operation as delivered back to the bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// The vault is locked.
    Locked,
    /// The operation failed with the given message.
    Failed(String),
}

/// What the bar should do with a settled lock request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockResolution {
    /// Navigate to the unlock screen.
    NavigateToUnlock,
    /// Report the failure; route and shared state stay as they are.
    ReportFailure(String),
    /// The issuing mount is gone; do nothing.
    Suppressed,
}

/// Issues lock tickets and resolves their outcomes.
#[derive(Debug, Clone, Default)]
pub struct VaultLockInvoker {
    next_sequence: u64,
    in_flight: u64,
}

impl VaultLockInvoker {
    /// Creates an invoker with no requests in flight.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_sequence: 0,
            in_flight: 0,
        }
    }

    /// Whether the lock action is offered at all.
    #[must_use]
    pub const fn is_available(password_set: bool) -> bool {
        password_set
    }

    /// Starts a request on behalf of mount `generation`.
    ///
    /// Returns `None` when no password is set, in which case the action does
    /// not exist.
    pub fn invoke(&mut self, password_set: bool, generation: u64) -> Option<LockTicket> {
        if !Self::is_available(password_set) {
            tracing::debug!("lock requested without a master password, ignoring");
            return None;
        }
        let ticket = LockTicket {
            generation,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.in_flight += 1;
        tracing::debug!(?ticket, "vault lock requested");
        Some(ticket)
    }

    /// Resolves a settled request.
    ///
    /// `live_generation` is `Some(n)` while the bar is mounted as generation
    /// `n`, `None` once unmounted.
    pub fn settle(
        &mut self,
        ticket: LockTicket,
        outcome: LockOutcome,
        live_generation: Option<u64>,
    ) -> LockResolution {
        self.in_flight = self.in_flight.saturating_sub(1);

        let current = live_generation == Some(ticket.generation);
        match outcome {
            LockOutcome::Locked if current => {
                tracing::debug!(?ticket, "vault locked");
                LockResolution::NavigateToUnlock
            }
            LockOutcome::Locked => {
                tracing::debug!(?ticket, ?live_generation, "vault locked after unmount, navigation suppressed");
                LockResolution::Suppressed
            }
            LockOutcome::Failed(message) if current => {
                tracing::error!(?ticket, error = %message, "failed to lock vault");
                LockResolution::ReportFailure(message)
            }
            LockOutcome::Failed(message) => {
                tracing::error!(?ticket, error = %message, "failed to lock vault after unmount");
                LockResolution::Suppressed
            }
        }
    }

    /// Number of requests awaiting an outcome.
    #[must_use]
    pub const fn in_flight(&self) -> u64 {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_without_password() {
        let mut invoker = VaultLockInvoker::new();
        assert_eq!(invoker.invoke(false, 1), None);
        assert_eq!(invoker.in_flight(), 0);
    }

    #[test]
    fn success_navigates_for_live_mount() {
        let mut invoker = VaultLockInvoker::new();
        let ticket = invoker.invoke(true, 3).unwrap();
        assert_eq!(
            invoker.settle(ticket, LockOutcome::Locked, Some(3)),
            LockResolution::NavigateToUnlock
        );
        assert_eq!(invoker.in_flight(), 0);
    }

    #[test]
    fn failure_is_reported() {
        let mut invoker = VaultLockInvoker::new();
        let ticket = invoker.invoke(true, 1).unwrap();
        assert_eq!(
            invoker.settle(ticket, LockOutcome::Failed("disk full".into()), Some(1)),
            LockResolution::ReportFailure("disk full".into())
        );
    }

    #[test]
    fn outcome_after_unmount_or_remount_is_suppressed() {
        let mut invoker = VaultLockInvoker::new();
        let first = invoker.invoke(true, 1).unwrap();
        let second = invoker.invoke(true, 1).unwrap();
        assert_ne!(first, second);

        assert_eq!(invoker.settle(first, LockOutcome::Locked, None), LockResolution::Suppressed);
        assert_eq!(invoker.settle(second, LockOutcome::Locked, Some(2)), LockResolution::Suppressed);
    }
}
