use crate::infra::ClientError;
use crate::infra::GameObserver;
use crate::infra::protocol::StatusResponse;
use crate::planner::{Decision, TurnAction};
use crate::state::WorldState;

pub struct CompositeObserver {
    observers: Vec<Box<dyn GameObserver + Send>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Box<dyn GameObserver + Send>>) -> Self {
        Self { observers }
    }
}

impl GameObserver for CompositeObserver {
    fn on_join(&mut self, robot_id: u64, base_url: &str) {
        for observer in &mut self.observers {
            observer.on_join(robot_id, base_url);
        }
    }

    fn on_turn_start(&mut self, turn: u32) {
        for observer in &mut self.observers {
            observer.on_turn_start(turn);
        }
    }

    fn on_state_update(&mut self, status: &StatusResponse, world: &WorldState) {
        for observer in &mut self.observers {
            observer.on_state_update(status, world);
        }
    }

    fn on_action_selected(&mut self, decision: &Decision, world: &WorldState) {
        for observer in &mut self.observers {
            observer.on_action_selected(decision, world);
        }
    }

    fn on_action_rejected(&mut self, action: TurnAction, error: &ClientError) {
        for observer in &mut self.observers {
            observer.on_action_rejected(action, error);
        }
    }

    fn on_turn_end(&mut self, turn: u32, actions: usize) {
        for observer in &mut self.observers {
            observer.on_turn_end(turn, actions);
        }
    }

    fn on_game_stopped(&mut self, turns_played: u32) {
        for observer in &mut self.observers {
            observer.on_game_stopped(turns_played);
        }
    }
}
