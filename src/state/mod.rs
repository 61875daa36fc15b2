mod map;
mod player_state;
mod world_state;

pub use map::{CellKind, GridError, Map};
pub use player_state::RobotState;
pub use world_state::{WorldError, WorldState};
