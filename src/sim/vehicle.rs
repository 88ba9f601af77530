//! Traffic vehicle state.
//!
//! Each vehicle is a plain data record owned by the simulation; the AI
//! mutates it every step and the renderer reads a snapshot keyed by id.
//! Visual signal flags are derived from AI fields plus elapsed time, never
//! stored independently.

use serde::{Deserialize, Serialize};

use crate::sim::config::SimConfig;

/// Body yaw applied while a lane change offset is pending, radians.
const LANE_CHANGE_YAW: f32 = 0.15;

/// Opaque vehicle handle, stable for the vehicle's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub u32);

/// Monotonic id source, reset per round.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VehicleIdGen {
    next: u32,
}

impl VehicleIdGen {
    pub fn next(&mut self) -> VehicleId {
        let id = VehicleId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Driver disposition, fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Holds its base speed, changes lanes on cooldown only.
    Passive,
    /// Dodges into a neighbor lane as soon as it has to brake.
    Aggressive,
    /// Broken down: speed 0, hazards on, no AI.
    Stalled,
}

/// Vehicle body type; decides collision half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    Car,
    Truck,
}

impl VehicleKind {
    pub fn half_width(&self) -> f32 {
        match self {
            VehicleKind::Car => 0.9,
            VehicleKind::Truck => 1.1,
        }
    }

    pub fn half_length(&self) -> f32 {
        match self {
            VehicleKind::Car => 2.0,
            VehicleKind::Truck => 4.0,
        }
    }
}

/// Complete state for one traffic vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub kind: VehicleKind,
    pub behavior: Behavior,
    /// Lane the vehicle currently counts as occupying.
    pub lane: usize,
    /// Lane being steered toward; differs from `lane` mid-change.
    pub target_lane: usize,
    /// Lateral position.
    pub x: f32,
    /// Longitudinal position relative to the player (negative = ahead).
    pub z: f32,
    /// Current speed over the ground.
    pub speed: f32,
    /// Desired speed when unobstructed.
    pub base_speed: f32,
    pub braking: bool,
    pub changing_lane: bool,
    /// Counts down to the next lane-change attempt.
    pub lane_timer: f32,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        kind: VehicleKind,
        behavior: Behavior,
        lane: usize,
        base_speed: f32,
        lane_timer: f32,
        config: &SimConfig,
    ) -> Self {
        Self {
            id,
            kind,
            behavior,
            lane,
            target_lane: lane,
            x: config.lanes[lane],
            z: config.spawn_z,
            speed: base_speed,
            base_speed,
            braking: false,
            changing_lane: false,
            lane_timer,
        }
    }

    /// Pending lateral offset toward the target lane.
    pub fn lane_offset(&self, config: &SimConfig) -> f32 {
        config.lanes[self.target_lane] - self.x
    }

    /// Indicator direction: -1 left, +1 right, 0 when not changing lanes.
    pub fn indicator(&self, config: &SimConfig) -> i8 {
        if !self.changing_lane {
            return 0;
        }
        if self.lane_offset(config) < 0.0 {
            -1
        } else {
            1
        }
    }

    pub fn snapshot(&self, config: &SimConfig, elapsed: f32) -> VehicleSnapshot {
        let indicator_phase = (elapsed * config.indicator_flash_rate).sin() > 0.0;
        let hazard_phase = (elapsed * config.hazard_flash_rate).sin() > 0.0;
        VehicleSnapshot {
            id: self.id,
            kind: self.kind,
            x: self.x,
            z: self.z,
            speed: self.speed,
            heading: self.lane_offset(config).clamp(-1.0, 1.0) * LANE_CHANGE_YAW,
            brake_light: self.braking,
            indicator: if indicator_phase {
                self.indicator(config)
            } else {
                0
            },
            hazard_on: self.behavior == Behavior::Stalled && hazard_phase,
        }
    }
}

/// Compact vehicle state for IPC transfer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub kind: VehicleKind,
    pub x: f32,
    pub z: f32,
    pub speed: f32,
    pub heading: f32,
    pub brake_light: bool,
    /// Flashing turn signal: -1 left, +1 right, 0 off this phase.
    pub indicator: i8,
    pub hazard_on: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(config: &SimConfig) -> Vehicle {
        Vehicle::new(
            VehicleId(0),
            VehicleKind::Car,
            Behavior::Passive,
            1,
            30.0,
            3.0,
            config,
        )
    }

    #[test]
    fn spawns_on_lane_center_at_spawn_boundary() {
        let config = SimConfig::default();
        let v = vehicle(&config);
        assert_eq!(v.x, config.lanes[1]);
        assert_eq!(v.z, config.spawn_z);
        assert_eq!(v.lane, v.target_lane);
    }

    #[test]
    fn indicator_tracks_pending_offset() {
        let config = SimConfig::default();
        let mut v = vehicle(&config);
        assert_eq!(v.indicator(&config), 0);

        v.target_lane = 2;
        v.changing_lane = true;
        assert_eq!(v.indicator(&config), 1);

        v.target_lane = 0;
        assert_eq!(v.indicator(&config), -1);
    }

    #[test]
    fn hazards_only_on_stalled() {
        let config = SimConfig::default();
        let mut v = vehicle(&config);
        // A phase where sin(t * rate) > 0.
        let lit_phase = 0.1;
        assert!(!v.snapshot(&config, lit_phase).hazard_on);

        v.behavior = Behavior::Stalled;
        assert!(v.snapshot(&config, lit_phase).hazard_on);
    }

    #[test]
    fn hazard_flash_alternates_with_time() {
        let config = SimConfig::default();
        let mut v = vehicle(&config);
        v.behavior = Behavior::Stalled;
        let period = std::f32::consts::PI / config.hazard_flash_rate;
        let on = v.snapshot(&config, 0.1).hazard_on;
        let off = v.snapshot(&config, 0.1 + period).hazard_on;
        assert_ne!(on, off);
    }

    #[test]
    fn id_gen_is_monotonic() {
        let mut ids = VehicleIdGen::default();
        assert_eq!(ids.next(), VehicleId(0));
        assert_eq!(ids.next(), VehicleId(1));
        assert_eq!(ids.next(), VehicleId(2));
    }
}
