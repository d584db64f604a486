//! Application module
//!
//! - Actions: What can happen
//! - State: What is true right now
//! - Reducer: Pure function (State, Action) -> State
//!
//! Engine snapshots enter the state only through `Action::SnapshotPublished`;
//! requests that need the engine (toggling a section) are actions the reducer
//! leaves alone and the event loop performs.

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use reducer::{map_key, reduce};
pub use state::{AppState, UiConfig};
