//! Field topology.
//!
//! The three zones are fixed (`core::zone::Zone`); what a match configures
//! is how they connect and where the hubs are. `ZoneTopology` is built and
//! validated once at reset and only read afterwards.
//!
//! ## Key Types
//!
//! - `ZoneTopology`: adjacency and hub placement lookups

pub mod topology;

pub use topology::ZoneTopology;

// Re-export zone types from core for convenience
pub use crate::core::zone::{HubId, Zone, ZoneMap};
