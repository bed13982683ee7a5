//! Robot actions.
//!
//! Each tick every robot submits exactly one `RobotAction`. The set is
//! fixed and small so that a learner can address it as a flat discrete
//! space; see `RobotAction::from_index` for the layout.
//!
//! Actions are never rejected with an error. One whose precondition fails
//! resolves as `Hold`.

use serde::{Deserialize, Serialize};

use super::entity::{RobotId, ROBOT_COUNT};
use super::team::Team;
use super::zone::{Zone, ZONE_COUNT};

/// A single robot's action for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotAction {
    /// Do nothing.
    #[default]
    Hold,
    /// Start moving to an adjacent zone.
    Move(Zone),
    /// Collect balls from the current zone's supply.
    Intake,
    /// Hand balls to another robot in the same zone.
    Pass(RobotId),
    /// Shoot one ball into the current zone's hub.
    Shoot,
}

/// Action discriminant, used for resolution ordering and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Hold,
    Move,
    Intake,
    Pass,
    Shoot,
}

impl ActionKind {
    /// Order in which action kinds are resolved within a tick.
    pub const RESOLUTION_ORDER: [ActionKind; 4] =
        [ActionKind::Intake, ActionKind::Pass, ActionKind::Shoot, ActionKind::Move];
}

/// Size of the discrete action space.
///
/// | index | action |
/// |---|---|
/// | 0 | Hold |
/// | 1..=3 | Move(Attacker / Neutral / Defender) |
/// | 4 | Intake |
/// | 5..=10 | Pass(robot 0..=5) |
/// | 11 | Shoot |
pub const ACTION_COUNT: usize = 1 + ZONE_COUNT + 1 + ROBOT_COUNT + 1;

const MOVE_BASE: u32 = 1;
const INTAKE_INDEX: u32 = MOVE_BASE + ZONE_COUNT as u32;
const PASS_BASE: u32 = INTAKE_INDEX + 1;
const SHOOT_INDEX: u32 = PASS_BASE + ROBOT_COUNT as u32;

impl RobotAction {
    /// Get the action's kind.
    #[must_use]
    pub const fn kind(self) -> ActionKind {
        match self {
            RobotAction::Hold => ActionKind::Hold,
            RobotAction::Move(_) => ActionKind::Move,
            RobotAction::Intake => ActionKind::Intake,
            RobotAction::Pass(_) => ActionKind::Pass,
            RobotAction::Shoot => ActionKind::Shoot,
        }
    }

    /// Decode a discrete action index. Returns `None` when out of range.
    #[must_use]
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(RobotAction::Hold),
            i if (MOVE_BASE..INTAKE_INDEX).contains(&i) => {
                Zone::from_index((i - MOVE_BASE) as usize).map(RobotAction::Move)
            }
            INTAKE_INDEX => Some(RobotAction::Intake),
            i if (PASS_BASE..SHOOT_INDEX).contains(&i) => {
                Some(RobotAction::Pass(RobotId::new((i - PASS_BASE) as u8)))
            }
            SHOOT_INDEX => Some(RobotAction::Shoot),
            _ => None,
        }
    }

    /// Encode as a discrete action index.
    ///
    /// Pass targets outside the roster have no index and encode as Hold.
    #[must_use]
    pub fn index(self) -> u32 {
        match self {
            RobotAction::Hold => 0,
            RobotAction::Move(zone) => MOVE_BASE + zone.index() as u32,
            RobotAction::Intake => INTAKE_INDEX,
            RobotAction::Pass(target) if target.is_valid() => PASS_BASE + target.0 as u32,
            RobotAction::Pass(_) => 0,
            RobotAction::Shoot => SHOOT_INDEX,
        }
    }

    /// Translate an action expressed in `team`'s own frame to absolute terms.
    ///
    /// A team's frame lists its own robots first and, for Blue, mirrors the
    /// field. The translation is its own inverse.
    #[must_use]
    pub const fn for_team(self, team: Team) -> Self {
        match self {
            RobotAction::Move(zone) => RobotAction::Move(zone.relative_to(team)),
            RobotAction::Pass(target) => RobotAction::Pass(target.relative_to(team)),
            other => other,
        }
    }
}

impl std::fmt::Display for RobotAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RobotAction::Hold => write!(f, "Hold"),
            RobotAction::Move(zone) => write!(f, "Move({})", zone),
            RobotAction::Intake => write!(f, "Intake"),
            RobotAction::Pass(target) => write!(f, "Pass({})", target),
            RobotAction::Shoot => write!(f, "Shoot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_count() {
        assert_eq!(ACTION_COUNT, 12);
    }

    #[test]
    fn test_index_layout() {
        assert_eq!(RobotAction::from_index(0), Some(RobotAction::Hold));
        assert_eq!(RobotAction::from_index(1), Some(RobotAction::Move(Zone::Attacker)));
        assert_eq!(RobotAction::from_index(3), Some(RobotAction::Move(Zone::Defender)));
        assert_eq!(RobotAction::from_index(4), Some(RobotAction::Intake));
        assert_eq!(RobotAction::from_index(5), Some(RobotAction::Pass(RobotId::new(0))));
        assert_eq!(RobotAction::from_index(10), Some(RobotAction::Pass(RobotId::new(5))));
        assert_eq!(RobotAction::from_index(11), Some(RobotAction::Shoot));
        assert_eq!(RobotAction::from_index(12), None);
    }

    #[test]
    fn test_every_index_decodes_back() {
        for i in 0..ACTION_COUNT as u32 {
            let action = RobotAction::from_index(i).unwrap();
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_kind() {
        assert_eq!(RobotAction::Hold.kind(), ActionKind::Hold);
        assert_eq!(RobotAction::Move(Zone::Neutral).kind(), ActionKind::Move);
        assert_eq!(RobotAction::Pass(RobotId::new(1)).kind(), ActionKind::Pass);
    }

    #[test]
    fn test_for_team() {
        let action = RobotAction::Move(Zone::Attacker);
        assert_eq!(action.for_team(Team::Red), action);
        assert_eq!(action.for_team(Team::Blue), RobotAction::Move(Zone::Defender));

        // Blue's "first teammate" is absolute robot 3.
        let pass = RobotAction::Pass(RobotId::new(0));
        assert_eq!(pass.for_team(Team::Blue), RobotAction::Pass(RobotId::new(3)));
        assert_eq!(RobotAction::Shoot.for_team(Team::Blue), RobotAction::Shoot);
    }

    #[test]
    fn test_action_serialization() {
        let action = RobotAction::Pass(RobotId::new(4));
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: RobotAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}
