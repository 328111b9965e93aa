//! Visit integrity engine for field sales and field marketing operations.
//!
//! The crate gates field-visit claims through a geofence, scores them for
//! fraud signals against recent visit history, commits accepted claims under
//! a per-day uniqueness key, deduplicates survey submissions by configured
//! answer keys, and prices completed activities. Persistence is abstracted
//! behind narrow store traits so callers bring their own backends; the
//! routers in each module expose the engine over HTTP.

pub mod commissions;
pub mod config;
pub mod error;
pub mod geo;
pub mod surveys;
pub mod telemetry;
pub mod visits;
