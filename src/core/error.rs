//! Error taxonomy.
//!
//! - `ConfigError`: invalid match setup, raised only by `reset`.
//! - `IllegalAction`: why a robot's action resolved as Hold. Never escapes
//!   `step`; it is reported through `MatchEvent::ActionRejected`.
//! - `SimError`: everything a caller of the engine can receive.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::RobotId;
use super::team::Team;
use super::zone::{HubId, Zone};
use crate::rules::EpisodePhase;

/// Match configuration failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("roster must contain {expected} robots, got {actual}")]
    RosterSize { expected: usize, actual: usize },

    #[error("team {team} must field {expected} robots, got {actual}")]
    TeamSize { team: Team, expected: usize, actual: usize },

    #[error("{robot} is outside the roster")]
    RobotOutOfRange { robot: RobotId },

    #[error("{robot} must belong to team {expected}")]
    SlotTeamMismatch { robot: RobotId, expected: Team },

    #[error("{robot} appears more than once in the roster")]
    DuplicateRobot { robot: RobotId },

    #[error("{robot} has zero capacity")]
    ZeroCapacity { robot: RobotId },

    #[error("{robot} has invalid transit time {value}")]
    InvalidTransitTime { robot: RobotId, value: f64 },

    #[error("{robot} has zero intake rate")]
    ZeroIntakeRate { robot: RobotId },

    #[error("{robot} has zero intake period")]
    ZeroIntakePeriod { robot: RobotId },

    #[error("{robot} has zero pass amount")]
    ZeroPassAmount { robot: RobotId },

    #[error("{robot} preloads {balls} balls but holds at most {capacity}")]
    PreloadExceedsCapacity { robot: RobotId, balls: u32, capacity: u32 },

    #[error("match duration must be at least one tick")]
    ZeroDuration,

    #[error("zone {zone} links to itself")]
    SelfLink { zone: Zone },

    #[error("zone {zone} has no neighbour")]
    IsolatedZone { zone: Zone },

    #[error("zone {zone} has more than one hub")]
    DuplicateHubZone { zone: Zone },

    #[error("{hub} is configured more than once")]
    DuplicateHubId { hub: HubId },

    #[error("{hub} has a shift schedule with zero-length shifts")]
    ZeroShiftLength { hub: HubId },

    #[error("unknown robot type '{0}'")]
    UnknownRobotType(String),
}

/// Reason an action was downgraded to Hold.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IllegalAction {
    #[error("robot is in transit")]
    InTransit,

    #[error("{to} is not adjacent to {from}")]
    NotAdjacent { from: Zone, to: Zone },

    #[error("robot is at capacity")]
    AtCapacity,

    #[error("zone has no ball supply")]
    NoSupply,

    #[error("robot holds no balls")]
    EmptyHanded,

    #[error("target {0} is not on the field")]
    UnknownRobot(RobotId),

    #[error("robot cannot pass to itself")]
    SelfPass,

    #[error("receiver is in another zone")]
    NotCoLocated,

    #[error("receiver is in transit")]
    ReceiverInTransit,

    #[error("receiver is at capacity")]
    ReceiverFull,

    #[error("zone has no hub")]
    NoHub,

    #[error("shooter is cooling down")]
    CoolingDown,

    #[error("intake is cooling down")]
    IntakeCoolingDown,

    #[error("hub does not accept this team")]
    WrongTeam,

    #[error("hub is inactive")]
    HubInactive,

    #[error("hub rate limit reached")]
    RateLimited,
}

/// Errors returned by the engine.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("step is only valid while running, engine is {phase:?}")]
    InvalidPhase { phase: EpisodePhase },

    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::TeamSize {
            team: Team::Blue,
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "team Blue must field 3 robots, got 2");
    }

    #[test]
    fn test_sim_error_from_config() {
        let err: SimError = ConfigError::ZeroDuration.into();
        assert!(matches!(err, SimError::Configuration(ConfigError::ZeroDuration)));
    }

    #[test]
    fn test_illegal_action_display() {
        let reason = IllegalAction::NotAdjacent {
            from: Zone::Attacker,
            to: Zone::Defender,
        };
        assert_eq!(reason.to_string(), "Defender is not adjacent to Attacker");
    }
}
