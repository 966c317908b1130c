use std::collections::VecDeque;

use super::event::TelemetryEvent;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub stages_added: u64,
    pub device_prompts: u64,
    pub missing_devices: u64,
    pub slot_prompts: u64,
    pub filters_attached: u64,
    pub confirmations: u64,
    pub commits: u64,
    pub remote_commits: u64,
    pub aborts: u64,
    pub cancellations: u64,
    pub stale_discards: u64,
    pub rejected_intents: u64,
    /// Commits over confirmation prompts.
    pub acceptance_ratio: f64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::StageAdded { .. } => snap.stages_added += 1,
            TelemetryEvent::DevicePrompted { .. } => snap.device_prompts += 1,
            TelemetryEvent::DeviceMissing { .. } => snap.missing_devices += 1,
            TelemetryEvent::SlotPrompted { .. } => snap.slot_prompts += 1,
            TelemetryEvent::FilterAttached { .. } => snap.filters_attached += 1,
            TelemetryEvent::ConfirmationRequested { .. } => snap.confirmations += 1,
            TelemetryEvent::Committed { remote, .. } => {
                snap.commits += 1;
                if *remote {
                    snap.remote_commits += 1;
                }
            }
            TelemetryEvent::Aborted { .. } => snap.aborts += 1,
            TelemetryEvent::Cancelled { .. } => snap.cancellations += 1,
            TelemetryEvent::StaleDiscarded { .. } => snap.stale_discards += 1,
            TelemetryEvent::Rejected { .. } => snap.rejected_intents += 1,
        }
    }

    // Queries that run without confirmation still count as commits.
    if snap.confirmations > 0 {
        snap.acceptance_ratio = (snap.commits.min(snap.confirmations)) as f64 / snap.confirmations as f64;
    }

    snap
}
