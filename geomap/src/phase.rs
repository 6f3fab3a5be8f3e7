//! Map lifecycle phases.
//!
//! A map instance moves strictly forward through
//! `Pristine -> Loading -> Loaded -> Mounting -> Mounted -> Layouting -> Layouted`.
//! [`PhaseTracker`] owns the current phase and lets callers suspend until a
//! phase has been reached.

use crate::error::GeoMapError;
use std::fmt;
use tokio::sync::watch;
use tracing::{debug, trace};

/// Lifecycle stage of a map instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum GeoMapPhase {
    #[default]
    Pristine,
    Loading,
    Loaded,
    Mounting,
    Mounted,
    Layouting,
    Layouted,
}

impl GeoMapPhase {
    /// Lowercase name, as used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pristine => "pristine",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Mounting => "mounting",
            Self::Mounted => "mounted",
            Self::Layouting => "layouting",
            Self::Layouted => "layouted",
        }
    }
}

impl fmt::Display for GeoMapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonic phase holder with async waiting.
///
/// Transitions only ever move forward. Waiters registered through
/// [`wait_for`](Self::wait_for) resume as soon as the phase reaches or
/// passes their target.
#[derive(Debug)]
pub struct PhaseTracker {
    tx: watch::Sender<GeoMapPhase>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(GeoMapPhase::Pristine);
        Self { tx }
    }

    /// Returns the current phase.
    pub fn current(&self) -> GeoMapPhase {
        *self.tx.borrow()
    }

    /// Moves to `to` if it is later than the current phase.
    ///
    /// Returns `true` if the phase changed.
    pub fn advance(&self, to: GeoMapPhase) -> bool {
        let mut from = GeoMapPhase::Pristine;
        let changed = self.tx.send_if_modified(|phase| {
            from = *phase;
            if to > *phase {
                *phase = to;
                true
            } else {
                false
            }
        });

        if changed {
            debug!(from = %from, to = %to, "Map phase transition");
        } else {
            trace!(current = %from, requested = %to, "Ignoring non-forward phase transition");
        }
        changed
    }

    /// Suspends until the phase is at least `target`.
    pub async fn wait_for(&self, target: GeoMapPhase) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so the channel cannot close
        // while we borrow it.
        let _ = rx.wait_for(|phase| *phase >= target).await;
    }

    /// Fails with [`GeoMapError::PhaseNotReached`] if the phase is below `min`.
    pub fn require(&self, min: GeoMapPhase) -> Result<(), GeoMapError> {
        let current = self.current();
        if current < min {
            return Err(GeoMapError::PhaseNotReached {
                required: min,
                current,
            });
        }
        Ok(())
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}
