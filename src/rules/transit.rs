//! Transit subsystem.
//!
//! Movement is a blocking countdown, not a position. `begin_move` starts
//! the countdown and records the destination; `tick_transit` runs once per
//! tick for every robot, before any other resolution, so a robot that
//! arrives can intake or shoot in the same tick.
//!
//! ```text
//! tick t     Move(Attacker) resolves     remaining = transit_ticks
//! tick t+1   tick_transit                remaining - 1
//! ...
//! tick t+n   tick_transit hits zero      zone = Attacker, may act
//! ```

use crate::core::error::IllegalAction;
use crate::core::state::RobotState;
use crate::core::zone::Zone;
use crate::zones::ZoneTopology;

/// Check whether `robot` may start moving to `target`.
pub fn check_move(topology: &ZoneTopology, robot: &RobotState, target: Zone) -> Result<(), IllegalAction> {
    if robot.in_transit() {
        return Err(IllegalAction::InTransit);
    }
    if !topology.is_adjacent(robot.zone, target) {
        return Err(IllegalAction::NotAdjacent {
            from: robot.zone,
            to: target,
        });
    }
    Ok(())
}

/// Start a move. Returns the transit length in ticks.
///
/// On failure the robot is untouched.
pub fn begin_move(topology: &ZoneTopology, robot: &mut RobotState, target: Zone) -> Result<u32, IllegalAction> {
    check_move(topology, robot, target)?;
    robot.transit_remaining_ticks = robot.transit_ticks.max(1);
    robot.destination = Some(target);
    Ok(robot.transit_remaining_ticks)
}

/// Advance a robot's transit by one tick.
///
/// Returns the zone the robot arrived in, if it arrived this tick.
pub fn tick_transit(robot: &mut RobotState) -> Option<Zone> {
    if robot.transit_remaining_ticks == 0 {
        return None;
    }
    robot.transit_remaining_ticks -= 1;
    if robot.transit_remaining_ticks > 0 {
        return None;
    }
    let arrived = robot.destination.take()?;
    robot.zone = arrived;
    Some(arrived)
}
