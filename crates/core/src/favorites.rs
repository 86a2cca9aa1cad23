//! Optimistic favorite-toggle state model.
//!
//! The server's toggle endpoint is the source of truth; this module models
//! the client-observable lifecycle of one toggle so the optimistic flip,
//! the server reconciliation, and the rollback path are all explicit
//! states rather than ad hoc boolean flags.

use crate::error::CoreError;
use crate::types::DbId;

/// Lifecycle of a single toggle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    /// Optimistic flip applied locally, remote call in flight.
    Pending,
    /// Remote call succeeded; the server's boolean was adopted.
    Committed,
    /// Remote call failed; the pre-toggle value was restored.
    RolledBack,
}

/// One favorite toggle from optimistic flip to resolution.
#[derive(Debug, Clone)]
pub struct ToggleOperation {
    pub listing_id: DbId,
    /// The favorite value before the toggle began.
    previous: bool,
    /// The value currently shown to the user.
    effective: bool,
    state: ToggleState,
}

impl ToggleOperation {
    /// Begin a toggle: flip the local value immediately and mark the
    /// operation pending.
    pub fn begin(listing_id: DbId, current: bool) -> Self {
        Self {
            listing_id,
            previous: current,
            effective: !current,
            state: ToggleState::Pending,
        }
    }

    /// Adopt the server's returned boolean as truth.
    ///
    /// The server value wins even when it differs from the optimistic
    /// guess, which is how racing devices converge.
    pub fn commit(&mut self, server_value: bool) -> Result<bool, CoreError> {
        self.ensure_pending()?;
        self.effective = server_value;
        self.state = ToggleState::Committed;
        Ok(self.effective)
    }

    /// Restore the pre-toggle value after a failed remote call.
    pub fn roll_back(&mut self) -> Result<bool, CoreError> {
        self.ensure_pending()?;
        self.effective = self.previous;
        self.state = ToggleState::RolledBack;
        Ok(self.effective)
    }

    /// The value the UI should currently display.
    pub fn effective(&self) -> bool {
        self.effective
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    fn ensure_pending(&self) -> Result<(), CoreError> {
        if self.state != ToggleState::Pending {
            return Err(CoreError::Conflict(format!(
                "Toggle for listing {} already resolved",
                self.listing_id
            )));
        }
        Ok(())
    }
}
