use crate::infra::protocol::RobotStatus;
use crate::infra::{Bounds, Position};

/// The parts of a robot's status the bot acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotState {
    pub robot_id: u64,
    pub position: Position,
    pub health: i64,
    pub moves: i64,
    pub max_moves: i64,
    pub weapon_range: i32,
    pub weapon_ammo: i64,
}

impl RobotState {
    pub fn can_move(&self) -> bool {
        self.moves > 0
    }

    pub fn can_shoot(&self) -> bool {
        self.weapon_ammo > 0
    }

    pub fn weapon_reach(&self) -> Bounds {
        Bounds::from_center_and_range(self.position, self.weapon_range)
    }

    /// Upper bound on the actions worth submitting in one turn.
    pub fn action_budget(&self) -> usize {
        (self.max_moves.max(self.moves).max(0) + self.weapon_ammo.max(0) + 1) as usize
    }
}

impl From<&RobotStatus> for RobotState {
    fn from(status: &RobotStatus) -> Self {
        Self {
            robot_id: status.robot_id,
            position: status.position(),
            health: status.health,
            moves: status.moves,
            max_moves: status.max_moves,
            weapon_range: status.weapon_range,
            weapon_ammo: status.weapon_ammo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_from_status() {
        let robot = RobotState::from(&fixtures::our_robot());
        assert_eq!(robot.position, Position::new(0, 0));
        assert_eq!(robot.moves, 4);
        assert!(robot.can_move());
        assert!(robot.can_shoot());
        assert_eq!(robot.action_budget(), 6);
    }

    #[test]
    fn test_weapon_reach_covers_diagonals() {
        let robot = RobotState::from(&fixtures::our_robot());
        let reach = robot.weapon_reach();
        assert!(reach.contains(&Position::new(2, 2)));
        assert!(!reach.contains(&Position::new(3, 0)));
    }
}
