//! Simulation core.
//!
//! Per-frame engine for the endless night drive: player kinematics,
//! procedural traffic with per-vehicle AI, collision detection, and
//! milestone-based speed progression. No Tauri dependency; everything here
//! runs headless and is exercised by the tests.

pub mod ai;
pub mod collision;
pub mod config;
pub mod input;
pub mod player;
pub mod progression;
pub mod round;
pub mod server;
pub mod traffic;
pub mod vehicle;

pub use config::SimConfig;
pub use input::SteerInput;
pub use round::{GameStatus, Round, RoundSnapshot, SimEvent};
pub use server::{GameServer, ServerStats, TickReport};
