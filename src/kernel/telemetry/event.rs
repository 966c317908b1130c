use serde::{Deserialize, Serialize};

use crate::kernel::schema::Role;
use crate::kernel::time::Turn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    StageAdded { role: Role, turn: Turn },

    DevicePrompted { candidates: usize, turn: Turn },

    DeviceMissing { turn: Turn },

    SlotPrompted { candidates: usize, turn: Turn },

    FilterAttached { turn: Turn },

    ConfirmationRequested { stages: usize, turn: Turn },

    Committed { remote: bool, turn: Turn },

    Aborted { turn: Turn },

    Cancelled { turn: Turn },

    /// A lookup finished after a cancel and its result was dropped.
    StaleDiscarded { turn: Turn },

    Rejected { turn: Turn },
}
