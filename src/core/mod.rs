//! Core match types: robots, teams, zones, configuration, state, actions.
//!
//! Everything here is plain data. The rules that change it live in
//! `crate::rules`.

pub mod entity;
pub mod team;
pub mod zone;
pub mod error;
pub mod config;
pub mod presets;
pub mod action;
pub mod state;
pub mod event;
pub mod snapshot;
pub mod rng;

pub use entity::{RobotId, ROBOTS_PER_TEAM, ROBOT_COUNT};
pub use team::{Team, TeamMap};
pub use zone::{HubId, Zone, ZoneMap, ZONE_COUNT};
pub use error::{ConfigError, IllegalAction, SimError, SimResult};
pub use config::{HubConfig, HubSchedule, MatchConfig, RobotType, RosterEntry, STANDARD_LINKS};
pub use presets::RobotTypeRegistry;
pub use action::{ActionKind, RobotAction, ACTION_COUNT};
pub use state::{HubState, MatchState, RobotState};
pub use event::{EventList, MatchEvent};
pub use snapshot::{HubView, MatchOutcome, MatchSnapshot, RobotView};
pub use rng::{PolicyRng, PolicyRngState};
