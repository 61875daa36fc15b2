use crate::infra::ClientError;
use crate::infra::protocol::StatusResponse;
use crate::planner::{Decision, TurnAction};
use crate::state::WorldState;

/// Trait for observing game events during execution
pub trait GameObserver {
    /// Called once the server accepted our robot
    fn on_join(&mut self, robot_id: u64, base_url: &str);

    /// Called when the server hands us the turn
    fn on_turn_start(&mut self, turn: u32);

    /// Called for every status snapshot taken while playing a turn
    fn on_state_update(&mut self, status: &StatusResponse, world: &WorldState);

    /// Called when an action is selected
    fn on_action_selected(&mut self, decision: &Decision, world: &WorldState);

    /// Called when the server refuses a move or shot
    fn on_action_rejected(&mut self, action: TurnAction, error: &ClientError) {
        let _ = (action, error);
    }

    /// Called after the turn has been handed back
    fn on_turn_end(&mut self, turn: u32, actions: usize);

    /// Called when the game loop stops
    fn on_game_stopped(&mut self, turns_played: u32);
}
