use tracing::{debug, info, warn};

use crate::infra::ClientError;
use crate::infra::GameObserver;
use crate::infra::protocol::StatusResponse;
use crate::planner::{Decision, TurnAction};
use crate::state::WorldState;

pub struct DefaultObserver;

impl GameObserver for DefaultObserver {
    fn on_join(&mut self, robot_id: u64, base_url: &str) {
        info!("Joined game on {} as robot {}", base_url, robot_id);
    }

    fn on_turn_start(&mut self, turn: u32) {
        info!("Turn {} started", turn);
    }

    fn on_state_update(&mut self, _status: &StatusResponse, world: &WorldState) {
        info!(
            "pos: {}, health: {}, moves: {}, ammo: {}, enemies: {}",
            world.robot.position,
            world.robot.health,
            world.robot.moves,
            world.robot.weapon_ammo,
            world.enemies.len(),
        );
    }

    fn on_action_selected(&mut self, decision: &Decision, world: &WorldState) {
        info!("action: {}", decision.action);
        if let Some(route) = &decision.route {
            debug!(
                "route ({} steps):\n{}",
                route.step_count(),
                world.draw_ascii_map(route.positions())
            );
        }
    }

    fn on_action_rejected(&mut self, action: TurnAction, error: &ClientError) {
        warn!("{} failed: {}", action, error);
    }

    fn on_turn_end(&mut self, turn: u32, actions: usize) {
        info!("Turn {} ended after {} actions", turn, actions);
    }

    fn on_game_stopped(&mut self, turns_played: u32) {
        info!("Game loop stopped after {} turns", turns_played);
    }
}
