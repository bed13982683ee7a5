//! Match events.
//!
//! Every `step` returns the discrete occurrences of that tick in
//! resolution order: arrivals first, then intakes, passes, shots and
//! departures, each phase in robot slot order. Reward shaping and replay
//! reconstruction consume this list; the engine never reads it back.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::ActionKind;
use super::entity::RobotId;
use super::error::IllegalAction;
use super::snapshot::MatchOutcome;
use super::team::{Team, TeamMap};
use super::zone::{HubId, Zone};

/// Something that happened during a tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    /// A robot completed its transit.
    RobotArrived { robot: RobotId, zone: Zone },

    /// A robot collected balls from its zone's supply.
    BallsIntaken { robot: RobotId, zone: Zone, count: u32 },

    /// Possession changed between two robots.
    BallsPassed { from: RobotId, to: RobotId, count: u32 },

    /// A hub accepted a shot.
    BallScored { robot: RobotId, team: Team, hub: HubId },

    /// A robot left its zone.
    TransitStarted { robot: RobotId, from: Zone, to: Zone, ticks: u32 },

    /// A robot's action failed its precondition and resolved as Hold.
    ActionRejected { robot: RobotId, kind: ActionKind, reason: IllegalAction },

    /// The match clock ran out.
    MatchEnded { scores: TeamMap<u32>, outcome: MatchOutcome },
}

impl MatchEvent {
    /// Stable name for the event variant, for logs and counters.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            MatchEvent::RobotArrived { .. } => "robot_arrived",
            MatchEvent::BallsIntaken { .. } => "balls_intaken",
            MatchEvent::BallsPassed { .. } => "balls_passed",
            MatchEvent::BallScored { .. } => "ball_scored",
            MatchEvent::TransitStarted { .. } => "transit_started",
            MatchEvent::ActionRejected { .. } => "action_rejected",
            MatchEvent::MatchEnded { .. } => "match_ended",
        }
    }

    /// The robot the event is about, if any.
    #[must_use]
    pub fn robot(&self) -> Option<RobotId> {
        match *self {
            MatchEvent::RobotArrived { robot, .. }
            | MatchEvent::BallsIntaken { robot, .. }
            | MatchEvent::BallScored { robot, .. }
            | MatchEvent::TransitStarted { robot, .. }
            | MatchEvent::ActionRejected { robot, .. } => Some(robot),
            MatchEvent::BallsPassed { from, .. } => Some(from),
            MatchEvent::MatchEnded { .. } => None,
        }
    }
}

/// Events of one tick. Most ticks produce only a handful.
pub type EventList = SmallVec<[MatchEvent; 8]>;
