use std::path::PathBuf;

use tracing::{info, warn};

use crate::infra::GameObserver;
use crate::infra::protocol::StatusResponse;
use crate::infra::replay::ReplayFile;
use crate::planner::Decision;
use crate::state::WorldState;

/// Records status snapshots to a replay file once the robot id is known.
pub struct ReplayObserver {
    folder: PathBuf,
    file: Option<ReplayFile>,
}

impl ReplayObserver {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            file: None,
        }
    }
}

impl GameObserver for ReplayObserver {
    fn on_join(&mut self, robot_id: u64, _base_url: &str) {
        match ReplayFile::create(&self.folder, robot_id) {
            Ok(file) => {
                info!("Recording replay to {}", file.path().display());
                self.file = Some(file);
            }
            Err(err) => warn!("Replay disabled, could not create file: {}", err),
        }
    }

    fn on_turn_start(&mut self, _turn: u32) {}

    fn on_state_update(&mut self, status: &StatusResponse, world: &WorldState) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        if let Err(err) = file.append(world.turn, status) {
            warn!("Replay disabled, write failed: {}", err);
            self.file = None;
        }
    }

    fn on_action_selected(&mut self, _decision: &Decision, _world: &WorldState) {}

    fn on_turn_end(&mut self, _turn: u32, _actions: usize) {}

    fn on_game_stopped(&mut self, _turns_played: u32) {
        self.file = None;
    }
}
