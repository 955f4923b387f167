//! Single in-flight guard for mutating actions
//!
//! Start, stop, both resets and config save share one [`ActionLock`]. A
//! request made while the lock is held is rejected, never queued. Each
//! acquisition hands out a fresh [`ActionToken`]; only the holder of the
//! current token can release the lock, so a completion that arrives after a
//! forced expiry cannot release a later action.

use std::time::{Duration, Instant};

/// Mutating actions serialized behind the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Start,
    Stop,
    ResetState,
    ResetWithData,
    SaveConfig,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Start => "Starting simulator",
            ActionKind::Stop => "Stopping simulator",
            ActionKind::ResetState => "Resetting simulator",
            ActionKind::ResetWithData => "Resetting simulator and clearing data",
            ActionKind::SaveConfig => "Saving configuration",
        }
    }
}

/// Proof of holding the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionToken(u64);

#[derive(Debug, Clone, Copy)]
struct Held {
    token: ActionToken,
    kind: ActionKind,
    since: Instant,
}

#[derive(Debug, Default)]
pub struct ActionLock {
    held: Option<Held>,
    next_token: u64,
}

impl ActionLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `kind`.
    ///
    /// Returns the kind of the in-flight action when the lock is already held.
    pub fn try_acquire(&mut self, kind: ActionKind) -> Result<ActionToken, ActionKind> {
        self.try_acquire_at(kind, Instant::now())
    }

    pub fn try_acquire_at(
        &mut self,
        kind: ActionKind,
        now: Instant,
    ) -> Result<ActionToken, ActionKind> {
        if let Some(held) = self.held {
            return Err(held.kind);
        }
        self.next_token += 1;
        let token = ActionToken(self.next_token);
        self.held = Some(Held {
            token,
            kind,
            since: now,
        });
        Ok(token)
    }

    /// Release the lock if `token` is the current holder.
    pub fn release(&mut self, token: ActionToken) -> bool {
        match self.held {
            Some(held) if held.token == token => {
                self.held = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    pub fn held_kind(&self) -> Option<ActionKind> {
        self.held.map(|h| h.kind)
    }

    /// Force-release a lock held for longer than `limit`.
    ///
    /// Returns the kind of the expired action.
    pub fn expire_if_overdue(&mut self, now: Instant, limit: Duration) -> Option<ActionKind> {
        let held = self.held?;
        if now.saturating_duration_since(held.since) >= limit {
            self.held = None;
            Some(held.kind)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected() {
        let mut lock = ActionLock::new();
        let token = lock.try_acquire(ActionKind::Start).unwrap();

        assert_eq!(lock.try_acquire(ActionKind::Stop), Err(ActionKind::Start));
        assert_eq!(
            lock.try_acquire(ActionKind::SaveConfig),
            Err(ActionKind::Start)
        );

        assert!(lock.release(token));
        assert!(!lock.is_held());
        assert!(lock.try_acquire(ActionKind::Stop).is_ok());
    }

    #[test]
    fn test_stale_token_cannot_release() {
        let mut lock = ActionLock::new();
        let first = lock.try_acquire(ActionKind::ResetState).unwrap();
        assert!(lock.release(first));

        let second = lock.try_acquire(ActionKind::Start).unwrap();
        assert_ne!(first, second);
        assert!(!lock.release(first));
        assert_eq!(lock.held_kind(), Some(ActionKind::Start));
    }

    #[test]
    fn test_expire_if_overdue() {
        let mut lock = ActionLock::new();
        let start = Instant::now();
        let token = lock.try_acquire_at(ActionKind::Stop, start).unwrap();
        let limit = Duration::from_secs(20);

        assert_eq!(lock.expire_if_overdue(start + Duration::from_secs(5), limit), None);
        assert!(lock.is_held());

        assert_eq!(
            lock.expire_if_overdue(start + Duration::from_secs(21), limit),
            Some(ActionKind::Stop)
        );
        assert!(!lock.is_held());

        // The late completion of the expired action is a no-op.
        assert!(!lock.release(token));
    }

    #[test]
    fn test_expire_on_free_lock_is_noop() {
        let mut lock = ActionLock::new();
        assert_eq!(lock.expire_if_overdue(Instant::now(), Duration::ZERO), None);
    }
}
