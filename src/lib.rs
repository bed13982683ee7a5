//! # rust-hubsim
//!
//! A deterministic 3-versus-3 robotics match engine for RL self-play.
//!
//! Six robots (three Red, three Blue) move between three zones, intake
//! balls, pass them between each other and shoot them into hubs. The
//! engine resolves one tick per `step` and hands back an observation
//! snapshot and the tick's events; reward shaping and tensors are the
//! caller's business.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: No hidden randomness, no wall clock, fixed
//!    resolution order. Equal inputs give bit-identical snapshots.
//!
//! 2. **Total**: Every action in the discrete space is accepted. Actions
//!    that make no sense right now resolve as Hold.
//!
//! 3. **Owned State**: Each `MatchEngine` owns its `MatchState`. Run as
//!    many side by side as there are workers.
//!
//! 4. **Configuration Over Code**: Robot types, hubs, schedules and ball
//!    placement are data in `MatchConfig`.
//!
//! ## Invariants
//!
//! - Balls are conserved: supply + held + scored is constant.
//! - No robot ever holds more than its capacity.
//! - A robot in transit does nothing but travel.
//!
//! ## Modules
//!
//! - `core`: IDs, teams, zones, configuration, state, actions, events, snapshots
//! - `zones`: Field topology (adjacency, hub placement)
//! - `rules`: Transit, scoring, action resolution, the step loop
//! - `policy`: Baseline policies and full-match rollouts
//! - `python`: PyO3 bindings (feature `python`)

pub mod core;
pub mod zones;
pub mod rules;
pub mod policy;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    RobotId, ROBOT_COUNT, ROBOTS_PER_TEAM,
    Team, TeamMap,
    Zone, ZoneMap, HubId,
    ConfigError, IllegalAction, SimError, SimResult,
    RobotType, RosterEntry, HubConfig, HubSchedule, MatchConfig, RobotTypeRegistry,
    RobotAction, ActionKind, ACTION_COUNT,
    MatchState, RobotState, HubState,
    MatchEvent, EventList,
    MatchSnapshot, MatchOutcome, RobotView, HubView,
    PolicyRng, PolicyRngState,
};

pub use crate::zones::ZoneTopology;

pub use crate::rules::{EpisodePhase, MatchEngine, StepOutcome};

pub use crate::policy::{
    Policy, HoldPolicy, RandomPolicy, ShuttlePolicy,
    run_match, MatchReport, RolloutOptions,
};
