use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::infra::protocol::JoinParams;
use crate::infra::{ArenaApi, ClientError, GameObserver};
use crate::planner::{Planner, TurnAction};
use crate::state::{WorldError, WorldState};

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    World(#[from] WorldError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub join: JoinParams,
    pub poll_interval: Duration,
    pub max_turns: Option<u32>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            join: JoinParams::default(),
            poll_interval: Duration::from_secs(1),
            max_turns: None,
        }
    }
}

pub struct Game<C> {
    connection: C,
    observer: Box<dyn GameObserver + Send>,
    planner: Planner,
    settings: GameSettings,
    open_turn: Option<u64>,

    pub turns_played: u32,
}

impl<C: ArenaApi> Game<C> {
    pub fn new(
        connection: C,
        observer: impl GameObserver + Send + 'static,
        planner: Planner,
        settings: GameSettings,
    ) -> Self {
        Self {
            connection,
            observer: Box::new(observer),
            planner,
            settings,
            open_turn: None,
            turns_played: 0,
        }
    }

    pub async fn run(&mut self) -> Result<(), GameError> {
        self.run_until(std::future::pending()).await
    }

    /// Plays until the game ends or `shutdown` completes. On shutdown a turn
    /// in progress is handed back before the observers hear about the stop.
    pub async fn run_until(
        &mut self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), GameError> {
        let outcome = tokio::select! {
            result = self.play() => Some(result),
            () = shutdown => None,
        };

        let result = match outcome {
            Some(result) => result,
            None => {
                info!("Shutdown requested after {} turns", self.turns_played);
                self.close_open_turn().await
            }
        };
        self.observer.on_game_stopped(self.turns_played);
        result
    }

    async fn close_open_turn(&mut self) -> Result<(), GameError> {
        if let Some(robot_id) = self.open_turn.take() {
            debug!("Ending the interrupted turn {}", self.turns_played);
            self.connection.end_turn(robot_id).await?;
        }
        Ok(())
    }

    async fn play(&mut self) -> Result<(), GameError> {
        let robot_id = self.connection.join(self.settings.join).await?;
        self.observer.on_join(robot_id, self.connection.base_url());

        loop {
            if self
                .settings
                .max_turns
                .is_some_and(|max_turns| self.turns_played >= max_turns)
            {
                debug!("Reached the turn limit of {}", self.turns_played);
                return Ok(());
            }

            self.wait_for_turn(robot_id).await?;

            self.turns_played += 1;
            self.open_turn = Some(robot_id);
            let turn = self.turns_played;
            let turn_start = Instant::now();
            self.observer.on_turn_start(turn);

            let actions = self.play_turn(robot_id, turn).await?;
            self.connection.end_turn(robot_id).await?;
            self.open_turn = None;
            self.observer.on_turn_end(turn, actions);

            let turn_duration = turn_start.elapsed();
            if turn_duration.as_millis() > 500 {
                debug!(
                    "Turn {} took {:.2}ms ({} actions)",
                    turn,
                    turn_duration.as_secs_f64() * 1000.0,
                    actions
                );
            }
        }
    }

    async fn wait_for_turn(&mut self, robot_id: u64) -> Result<(), GameError> {
        loop {
            let status = self.connection.status(robot_id).await?;
            if status.is_our_turn() {
                return Ok(());
            }
            tracing::trace!("Not our turn, waiting");
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    /// Acts on fresh snapshots until the planner ends the turn.
    async fn play_turn(&mut self, robot_id: u64, turn: u32) -> Result<usize, GameError> {
        let mut actions = 0;
        let mut budget: Option<usize> = None;

        loop {
            let status = self.connection.status(robot_id).await?;
            if !status.is_our_turn() {
                warn!("Turn {} was taken away after {} actions", turn, actions);
                return Ok(actions);
            }

            let world = WorldState::from_status(&status, turn)?;
            self.observer.on_state_update(&status, &world);

            let limit = *budget.get_or_insert_with(|| world.robot.action_budget());
            if actions >= limit {
                warn!("Turn {} used its budget of {} actions", turn, limit);
                return Ok(actions);
            }

            let decision = self.planner.decide_action(&world);
            self.observer.on_action_selected(&decision, &world);

            let result = match decision.action {
                TurnAction::Move(position) => self.connection.move_to(robot_id, position).await,
                TurnAction::Shoot(position) => self.connection.shoot(robot_id, position).await,
                TurnAction::EndTurn(_) => return Ok(actions),
            };

            match result {
                Ok(()) => actions += 1,
                Err(err @ ClientError::Rejected { .. }) => {
                    self.observer.on_action_rejected(decision.action, &err);
                    return Ok(actions);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
