mod client;
mod composite_observer;
mod default_observer;
mod game_observer;
mod pathfinding;
pub mod protocol;
mod replay;
mod replay_observer;
mod types;

pub use client::{ArenaApi, ArenaClient, ClientError};
pub use composite_observer::CompositeObserver;
pub use default_observer::DefaultObserver;
pub use game_observer::GameObserver;
pub use pathfinding::{Endpoint, Pathfinder, Route, SearchError};
pub use replay::ReplayFile;
pub use replay_observer::ReplayObserver;
pub use types::{Bounds, Position};
