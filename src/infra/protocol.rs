//! JSON shapes exchanged with the arena server.

use serde::{Deserialize, Serialize};

use crate::infra::Position;

/// Query parameters of the `join` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinParams {
    pub engine_level: u32,
    pub shield_level: u32,
    pub weapon_level: u32,
}

impl Default for JoinParams {
    fn default() -> Self {
        Self {
            engine_level: 1,
            shield_level: 1,
            weapon_level: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoinResponse {
    pub robot_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub is_your_turn: i64,
    #[serde(default)]
    pub robot: Option<RobotStatus>,
    #[serde(default)]
    pub enemies: Vec<RobotStatus>,
    /// Cells indexed `arena[x][y]`.
    #[serde(default)]
    pub arena: Vec<Vec<ArenaCell>>,
}

impl StatusResponse {
    pub fn is_our_turn(&self) -> bool {
        self.is_your_turn == 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotStatus {
    pub robot_id: u64,
    pub robot_index: i64,
    pub shield_level: i64,
    pub health: i64,
    pub max_health: i64,
    pub capacity: i64,
    pub max_capacity: i64,
    pub x: i32,
    pub y: i32,
    pub engine_level: i64,
    pub max_moves: i64,
    pub moves: i64,
    pub weapon_level: i64,
    pub weapon_range: i32,
    pub weapon_power: i64,
    pub weapon_ammo: i64,
}

impl RobotStatus {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaCell {
    /// 0 free, 1 robot, 2 obstacle.
    #[serde(rename = "type")]
    pub kind: i64,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub robot: Option<RobotStatus>,
}
