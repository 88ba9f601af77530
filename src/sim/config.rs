//! Simulation configuration.
//!
//! Every tunable of the game feel lives here: road geometry, progression
//! curve, steering response, traffic AI thresholds and spawn weights.
//! A config is supplied when a round is initialized and never mutated
//! while the round runs.

use serde::{Deserialize, Serialize};

/// Full set of simulation tunables.
///
/// Defaults carry the shipped game feel. The frontend may override any
/// subset at init time; `validate` guards the structural invariants the
/// simulation relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Lane center-line x coordinates, strictly increasing.
    pub lanes: Vec<f32>,
    /// Full road width.
    pub road_width: f32,
    /// Gap kept between the player hull and the road edge.
    pub edge_margin: f32,
    /// z at which traffic enters the corridor (negative = ahead of the player).
    pub spawn_z: f32,
    /// z behind the player past which traffic despawns.
    pub despawn_behind_z: f32,
    /// Extra margin past `spawn_z` at which faster-than-world traffic despawns.
    pub despawn_ahead_margin: f32,

    // Progression
    pub base_speed: f32,
    pub max_speed: f32,
    /// World speed gained per milestone.
    pub speed_increment: f32,
    /// Distance between speed milestones.
    pub milestone_distance: f32,

    // Player steering
    /// Lateral acceleration while a steer key is held.
    pub steer_accel: f32,
    /// Exponential damping rate applied to lateral velocity.
    pub lateral_damping: f32,
    pub player_half_width: f32,
    pub player_half_length: f32,

    // Traffic spawner
    /// Seconds between spawns at base speed; shrinks with the speed ratio.
    pub spawn_interval_base: f32,
    pub stalled_weight: f32,
    pub aggressive_weight: f32,
    pub truck_weight: f32,
    /// Base speed range sampled for passive traffic.
    pub passive_speed_range: (f32, f32),
    /// Base speed range sampled for aggressive traffic.
    pub aggressive_speed_range: (f32, f32),

    // Vehicle AI
    /// Gap below which a vehicle brakes for a neighbor ahead.
    pub brake_distance: f32,
    /// Gap below which the braking ceiling is halved.
    pub critical_distance: f32,
    /// Lateral distance under which a vehicle counts as occupying a lane.
    pub lane_occupancy_threshold: f32,
    /// Fraction of the neighbor's speed used as the braking ceiling.
    pub brake_speed_factor: f32,
    /// Speed approach rate while braking (abrupt).
    pub brake_approach_rate: f32,
    /// Speed approach rate while cruising (gradual).
    pub cruise_approach_rate: f32,
    /// Lateral approach rate during a lane change.
    pub lane_change_rate: f32,
    /// Lateral distance under which a lane change counts as complete.
    pub lane_change_epsilon: f32,
    /// Cooldown range (seconds) sampled after a committed lane change.
    pub lane_change_cooldown: (f32, f32),
    /// Delay before retrying when every candidate lane is blocked.
    pub lane_change_retry_delay: f32,
    /// Safety box checked around the target lane before committing.
    pub safety_box_lateral: f32,
    pub safety_box_ahead: f32,
    pub safety_box_behind: f32,

    // Collision
    /// Slack subtracted from summed half-widths before an overlap counts.
    pub collision_slack_lateral: f32,
    pub collision_slack_longitudinal: f32,
    /// Collision detection is suppressed for this long after round start.
    pub invincibility_secs: f32,

    // Visual signals (phase rates in rad/s)
    pub hazard_flash_rate: f32,
    pub indicator_flash_rate: f32,

    /// Upper clamp applied to dt before any integration.
    pub dt_max: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lanes: vec![-6.0, -2.0, 2.0, 6.0],
            road_width: 16.0,
            edge_margin: 1.2,
            spawn_z: -150.0,
            despawn_behind_z: 50.0,
            despawn_ahead_margin: 20.0,

            base_speed: 40.0,
            max_speed: 120.0,
            speed_increment: 8.0,
            milestone_distance: 300.0,

            steer_accel: 90.0,
            lateral_damping: 6.0,
            player_half_width: 0.9,
            player_half_length: 2.0,

            spawn_interval_base: 1.4,
            stalled_weight: 0.15,
            aggressive_weight: 0.20,
            truck_weight: 0.20,
            passive_speed_range: (15.0, 35.0),
            aggressive_speed_range: (30.0, 45.0),

            brake_distance: 25.0,
            critical_distance: 12.0,
            lane_occupancy_threshold: 2.0,
            brake_speed_factor: 0.9,
            brake_approach_rate: 6.0,
            cruise_approach_rate: 1.5,
            lane_change_rate: 4.0,
            lane_change_epsilon: 0.05,
            lane_change_cooldown: (2.0, 5.0),
            lane_change_retry_delay: 0.5,
            safety_box_lateral: 2.0,
            safety_box_ahead: 12.0,
            safety_box_behind: 8.0,

            collision_slack_lateral: 0.2,
            collision_slack_longitudinal: 0.2,
            invincibility_secs: 2.5,

            hazard_flash_rate: 10.0,
            indicator_flash_rate: 8.0,

            dt_max: 0.1,
        }
    }
}

impl SimConfig {
    pub fn road_half_width(&self) -> f32 {
        self.road_width / 2.0
    }

    /// Lateral clamp for the player position.
    pub fn steer_limit(&self) -> f32 {
        self.road_half_width() - self.edge_margin
    }

    /// World speed relative to base speed; drives spawn frequency and audio pitch.
    pub fn speed_ratio(&self, world_speed: f32) -> f32 {
        world_speed / self.base_speed
    }

    /// Far despawn boundary for traffic outrunning the world scroll.
    pub fn despawn_ahead_z(&self) -> f32 {
        self.spawn_z - self.despawn_ahead_margin
    }

    /// Check structural invariants before a round is allowed to run.
    pub fn validate(&self) -> Result<(), String> {
        if self.lanes.len() < 2 {
            return Err("config requires at least 2 lanes".into());
        }
        if self.lanes.windows(2).any(|w| w[0] >= w[1]) {
            return Err("lane coordinates must be strictly increasing".into());
        }
        if self.road_width <= 0.0 {
            return Err("road width must be positive".into());
        }
        if self.milestone_distance <= 0.0 {
            return Err("milestone distance must be positive".into());
        }
        if self.base_speed <= 0.0 || self.max_speed < self.base_speed {
            return Err("speed range must satisfy 0 < base <= max".into());
        }
        if self.dt_max <= 0.0 {
            return Err("dt_max must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_single_lane() {
        let config = SimConfig {
            lanes: vec![0.0],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unsorted_lanes() {
        let config = SimConfig {
            lanes: vec![-2.0, 2.0, 0.0],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_speed_range() {
        let config = SimConfig {
            base_speed: 50.0,
            max_speed: 40.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn speed_ratio_starts_at_one() {
        let config = SimConfig::default();
        assert_eq!(config.speed_ratio(config.base_speed), 1.0);
    }
}
