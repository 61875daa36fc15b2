use std::fmt;

use tracing::debug;

use crate::infra::{Pathfinder, Position, Route};
use crate::state::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    NoEnemies,
    OutOfMoves,
    /// Standing next to the target, nothing left to close in on.
    Engaged,
    NoRoute,
    InvalidInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Shoot(Position),
    Move(Position),
    EndTurn(EndReason),
}

impl fmt::Display for TurnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnAction::Shoot(pos) => write!(f, "shoot at {}", pos),
            TurnAction::Move(pos) => write!(f, "move to {}", pos),
            TurnAction::EndTurn(reason) => write!(f, "end turn ({:?})", reason),
        }
    }
}

/// The decision together with the route it was based on, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: TurnAction,
    pub route: Option<Route>,
}

impl Decision {
    fn end(reason: EndReason) -> Self {
        Self {
            action: TurnAction::EndTurn(reason),
            route: None,
        }
    }
}

pub struct Planner {
    pathfinder: Pathfinder,
}

impl Planner {
    pub fn new(pathfinder: Pathfinder) -> Self {
        Self { pathfinder }
    }

    /// Picks the next single action from a fresh world view.
    #[tracing::instrument(level = "debug", skip(self, world), fields(turn = world.turn))]
    pub fn decide_action(&self, world: &WorldState) -> Decision {
        let Some(enemy) = world.nearest_enemy() else {
            debug!("No enemies left");
            return Decision::end(EndReason::NoEnemies);
        };
        let target = enemy.position;

        if world.robot.can_shoot() && world.in_weapon_range(target) {
            return Decision {
                action: TurnAction::Shoot(target),
                route: None,
            };
        }

        if !world.robot.can_move() {
            return Decision::end(EndReason::OutOfMoves);
        }

        let route = match self.pathfinder.find(&world.map, world.robot.position, target) {
            Ok(Some(route)) => route,
            Ok(None) => {
                debug!(%target, "No route to enemy");
                return Decision::end(EndReason::NoRoute);
            }
            Err(err) => {
                tracing::warn!("Pathfinding rejected the turn: {}", err);
                return Decision::end(EndReason::InvalidInput);
            }
        };

        debug!(%target, steps = route.step_count(), "Route to enemy");

        // The enemy holds the last cell; it can be reached but not entered
        match route.first_step() {
            Some(step) if step != target => Decision {
                action: TurnAction::Move(step),
                route: Some(route),
            },
            _ => Decision {
                action: TurnAction::EndTurn(EndReason::Engaged),
                route: Some(route),
            },
        }
    }
}
