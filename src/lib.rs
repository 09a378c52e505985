pub mod engine;
pub mod input;
pub mod lap;
pub mod session;
pub mod time;
pub mod view;

pub use engine::{Command, EngineState, StopwatchEngine};
