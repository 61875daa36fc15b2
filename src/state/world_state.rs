use thiserror::Error;

use crate::infra::Position;
use crate::infra::protocol::StatusResponse;
use crate::state::{GridError, Map, RobotState};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("invalid arena: {0}")]
    InvalidGrid(#[from] GridError),
    #[error("status has no robot for us")]
    MissingRobot,
}

/// Fresh view of the arena for one decision.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub turn: u32,
    pub map: Map,
    pub robot: RobotState,
    pub enemies: Vec<RobotState>,
}

impl WorldState {
    pub fn from_status(status: &StatusResponse, turn: u32) -> Result<Self, WorldError> {
        let robot = status.robot.as_ref().ok_or(WorldError::MissingRobot)?;
        let map = Map::from_snapshot(&status.arena)?;

        Ok(Self {
            turn,
            map,
            robot: RobotState::from(robot),
            enemies: status.enemies.iter().map(RobotState::from).collect(),
        })
    }

    /// Closest enemy by step distance; the earlier one in the status wins ties.
    pub fn nearest_enemy(&self) -> Option<&RobotState> {
        self.enemies
            .iter()
            .min_by_key(|enemy| self.robot.position.distance(&enemy.position))
    }

    pub fn in_weapon_range(&self, pos: Position) -> bool {
        self.robot.weapon_reach().contains(&pos)
    }

    pub fn draw_ascii_map(&self, path: &[Position]) -> String {
        self.map.draw_ascii(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_from_reference_status() {
        let world = WorldState::from_status(&fixtures::reference_status(), 3).unwrap();
        assert_eq!(world.turn, 3);
        assert_eq!(world.robot.position, Position::new(0, 0));
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.map.width(), 10);
        assert!(!world.in_weapon_range(Position::new(9, 9)));
        assert!(world.in_weapon_range(Position::new(2, 1)));
    }

    #[test]
    fn test_nearest_enemy_prefers_first_on_tie() {
        let mut first = fixtures::enemy_robot();
        first.robot_id = 1;
        first.x = 0;
        first.y = 5;
        let mut second = fixtures::enemy_robot();
        second.robot_id = 2;
        second.x = 5;
        second.y = 0;
        let mut far = fixtures::enemy_robot();
        far.robot_id = 3;

        let status = fixtures::status_with(fixtures::our_robot(), vec![far, first, second]);
        let world = WorldState::from_status(&status, 0).unwrap();
        assert_eq!(world.nearest_enemy().map(|e| e.robot_id), Some(1));
    }

    #[test]
    fn test_missing_robot() {
        let mut status = fixtures::reference_status();
        status.robot = None;
        assert_eq!(
            WorldState::from_status(&status, 0).unwrap_err(),
            WorldError::MissingRobot
        );
    }

    #[test]
    fn test_invalid_grid_is_surfaced() {
        let mut status = fixtures::reference_status();
        status.arena[4].pop();
        assert!(matches!(
            WorldState::from_status(&status, 0),
            Err(WorldError::InvalidGrid(GridError::NonUniformColumns { column: 4, .. }))
        ));
    }
}
