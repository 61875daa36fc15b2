//! Shared test data: the 10x10 reference arena with two robots.

use serde_json::json;

use crate::infra::protocol::{ArenaCell, RobotStatus, StatusResponse};

const OBSTACLES: [(i32, i32); 6] = [(3, 1), (3, 2), (3, 3), (6, 6), (6, 7), (6, 8)];

pub fn our_robot() -> RobotStatus {
    serde_json::from_value(json!({
        "robot_id": 1531200266760705000u64, "robot_index": 0, "shield_level": 1,
        "health": 10, "max_health": 10, "capacity": 0, "max_capacity": 10,
        "x": 0, "y": 0, "engine_level": 1, "max_moves": 4, "moves": 4,
        "weapon_level": 0, "weapon_range": 2, "weapon_power": 2, "weapon_ammo": 1
    }))
    .expect("robot fixture")
}

pub fn enemy_robot() -> RobotStatus {
    serde_json::from_value(json!({
        "robot_id": 1531200269174899000u64, "robot_index": 1, "shield_level": 0,
        "health": 6, "max_health": 6, "capacity": 0, "max_capacity": 10,
        "x": 9, "y": 9, "engine_level": 1, "max_moves": 4, "moves": 4,
        "weapon_level": 1, "weapon_range": 4, "weapon_power": 4, "weapon_ammo": 1
    }))
    .expect("enemy fixture")
}

/// Arena with robots at the given positions, indexed `arena[x][y]`.
pub fn arena_with_robots(robots: &[RobotStatus]) -> Vec<Vec<ArenaCell>> {
    (0..10)
        .map(|x| {
            (0..10)
                .map(|y| {
                    let robot = robots.iter().find(|r| r.x == x && r.y == y).cloned();
                    let kind = if robot.is_some() {
                        1
                    } else if OBSTACLES.contains(&(x, y)) {
                        2
                    } else {
                        0
                    };
                    ArenaCell { kind, x, y, robot }
                })
                .collect()
        })
        .collect()
}

pub fn reference_arena() -> Vec<Vec<ArenaCell>> {
    arena_with_robots(&[our_robot(), enemy_robot()])
}

pub fn status_with(robot: RobotStatus, enemies: Vec<RobotStatus>) -> StatusResponse {
    let mut all = enemies.clone();
    all.push(robot.clone());
    StatusResponse {
        is_your_turn: 1,
        robot: Some(robot),
        enemies,
        arena: arena_with_robots(&all),
    }
}

pub fn reference_status() -> StatusResponse {
    status_with(our_robot(), vec![enemy_robot()])
}
