//! Dialog telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer. It is never read inside
//! dialog decisions.
//!
//! # PRIVACY INVARIANT
//! Events never carry user content (utterances, argument values, contact
//! names). Only roles, counts and turn indices.

pub mod event;
pub mod metrics;
pub mod recorder;
