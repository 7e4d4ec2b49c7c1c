//! Session-scoped serving gate: minimum scan spacing between nudges plus
//! the no-repeat history check.

use serde::{Deserialize, Serialize};

use crate::domain::session::SessionContext;

pub const DEFAULT_SCAN_SPACING: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Minimum scans between served nudges.
    pub scan_spacing: usize,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { scan_spacing: DEFAULT_SCAN_SPACING }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ThrottleManager {
    spacing: usize,
}

impl Default for ThrottleManager {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_SPACING)
    }
}

impl ThrottleManager {
    pub fn new(spacing: usize) -> Self {
        Self { spacing }
    }

    pub fn from_config(config: ThrottleConfig) -> Self {
        Self::new(config.scan_spacing)
    }

    /// True when no nudge has ever been served, or enough scans have
    /// passed since the last one.
    pub fn can_serve(&self, session: &SessionContext) -> bool {
        match session.last_nudge_scan_index {
            None => true,
            Some(last) => session.scans.len().saturating_sub(last) >= self.spacing,
        }
    }

    pub fn already_served(&self, session: &SessionContext, candidate_id: &str) -> bool {
        session.nudge_history.iter().any(|id| id == candidate_id)
    }
}
