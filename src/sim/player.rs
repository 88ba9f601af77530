//! Player kinematics.
//!
//! The player never moves longitudinally; the world scrolls past a fixed
//! reference z. Steering input accelerates the car laterally, damping bleeds
//! the velocity off, and the position clamps to the drivable road.

use serde::{Deserialize, Serialize};

use crate::sim::config::SimConfig;
use crate::sim::input::SteerInput;

/// Visual lean applied at full steering velocity, radians.
const STEER_LEAN: f32 = 0.05;

/// Lateral state of the player car.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Lateral position.
    pub x: f32,
    /// Lateral velocity.
    pub vx: f32,
}

impl PlayerState {
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.vx = 0.0;
    }

    /// Advance one step: accelerate in the input direction, damp, integrate,
    /// clamp to the road. Velocity zeroes on a clamp so the car never stores
    /// energy against the wall.
    pub fn update(&mut self, input: SteerInput, dt: f32, config: &SimConfig) {
        self.vx += input.axis() * config.steer_accel * dt;
        self.vx *= (-config.lateral_damping * dt).exp();
        self.x += self.vx * dt;

        let limit = config.steer_limit();
        if self.x >= limit {
            self.x = limit;
            self.vx = 0.0;
        } else if self.x <= -limit {
            self.x = -limit;
            self.vx = 0.0;
        }
    }

    /// Body yaw for the renderer, leaning into the current steer direction.
    pub fn heading(&self, config: &SimConfig) -> f32 {
        // Terminal steer velocity under constant input.
        let terminal = config.steer_accel / config.lateral_damping;
        -(self.vx / terminal).clamp(-1.0, 1.0) * STEER_LEAN
    }

    pub fn snapshot(&self, config: &SimConfig) -> PlayerSnapshot {
        PlayerSnapshot {
            x: self.x,
            vx: self.vx,
            heading: self.heading(config),
        }
    }
}

/// Compact player state for IPC transfer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub vx: f32,
    pub heading: f32,
}
