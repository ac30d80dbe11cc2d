//! Client-resident timer: pure state machine and async engine

pub mod engine;
pub mod ports;
pub mod state;

pub use engine::{TimerEngine, TimerNotification, TimerSnapshot};
pub use ports::SessionGateway;
pub use state::{TimerPhase, TimerState};
