use std::sync::atomic::{AtomicU8, Ordering};

/// Connection lifecycle states (§3 `ConnectionState`).
///
/// `Disconnected` is the initial state; `Stopped` is terminal and every
/// other state may transition into it via [`ConnectionStateHandle::stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    /// No connection attempt is in flight.
    Disconnected = 0,
    /// A dial is in progress.
    Connecting = 1,
    /// The stream is established and ACKing snapshots.
    Connected = 2,
    /// The stream ended and a reconnect delay is being awaited.
    Reconnecting = 3,
    /// Terminal: `Stop()` was called.
    Stopped = 4,
}

impl ConnectionState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Disconnected,
            1 => Self::Connecting,
            2 => Self::Connected,
            3 => Self::Reconnecting,
            _ => Self::Stopped,
        }
    }

    /// Whether `self -> next` is a legal edge per §3's transition table.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if next == Self::Stopped {
            // Any state -> Stopped, idempotently.
            return true;
        }
        matches!(
            (self, next),
            (Self::Disconnected, Self::Connecting)
                | (Self::Connecting, Self::Connected)
                | (Self::Connecting, Self::Reconnecting)
                | (Self::Connected, Self::Reconnecting)
                | (Self::Reconnecting, Self::Connecting)
        )
    }
}

/// Error returned by [`ConnectionStateHandle::transition`] when an edge is
/// not in the table above.
#[derive(Debug, thiserror::Error)]
#[error("illegal connection state transition: {from:?} -> {to:?}")]
pub struct IllegalTransition {
    /// The state the transition was attempted from.
    pub from: ConnectionState,
    /// The state the transition was attempted to.
    pub to: ConnectionState,
}

/// A thread-safe, observer-readable holder for [`ConnectionState`] (§4.8:
/// "announced via an internal, thread-safe state field readable by
/// observers").
#[derive(Debug)]
pub struct ConnectionStateHandle {
    inner: AtomicU8,
}

impl Default for ConnectionStateHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionStateHandle {
    /// Create a handle initialized to [`ConnectionState::Disconnected`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: AtomicU8::new(ConnectionState::Disconnected as u8),
        }
    }

    /// Read the current state. Safe to call concurrently with
    /// [`Self::transition`].
    #[must_use]
    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.inner.load(Ordering::SeqCst))
    }

    /// Attempt a transition, failing if the edge is not legal.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalTransition`] if `self.get() -> next` is not in the
    /// table in §3.
    pub fn transition(&self, next: ConnectionState) -> Result<(), IllegalTransition> {
        let current = self.get();
        if !current.can_transition_to(next) {
            return Err(IllegalTransition {
                from: current,
                to: next,
            });
        }
        self.inner.store(next as u8, Ordering::SeqCst);
        Ok(())
    }

    /// Unconditionally transition to [`ConnectionState::Stopped`].
    ///
    /// Idempotent: calling this from any state, including `Stopped` itself,
    /// always succeeds (§3: "any state→Stopped (idempotent)").
    pub fn stop(&self) {
        self.inner.store(ConnectionState::Stopped as u8, Ordering::SeqCst);
    }
}
