//! Per-vehicle traffic AI: car-following, lane changes, longitudinal motion.
//!
//! A vehicle can be braking and changing lanes at the same time. Stalled
//! vehicles skip all of it and only drift with the world scroll.

use crate::sim::config::SimConfig;
use crate::sim::vehicle::{Behavior, Vehicle};

/// Advance the vehicle at `idx` by one step.
///
/// Takes the whole collection because braking and lane selection scan the
/// other live vehicles; only `vehicles[idx]` is mutated.
pub fn update_vehicle(
    vehicles: &mut [Vehicle],
    idx: usize,
    dt: f32,
    world_speed: f32,
    config: &SimConfig,
) {
    if vehicles[idx].behavior == Behavior::Stalled {
        // Parked on the roadway: world scroll only.
        vehicles[idx].z += world_speed * dt;
        return;
    }

    let ceiling = follow_ceiling(vehicles, idx, config);
    let v = &vehicles[idx];

    let (target_speed, rate) = match ceiling {
        Some(cap) => (cap.min(v.base_speed), config.brake_approach_rate),
        None => (v.base_speed, config.cruise_approach_rate),
    };
    let braking = ceiling.is_some();

    let alpha = 1.0 - (-rate * dt).exp();
    let speed = (v.speed + (target_speed - v.speed) * alpha).max(0.0);

    let v = &mut vehicles[idx];
    v.braking = braking;
    v.speed = speed;
    v.lane_timer -= dt;
    // Aggressive drivers stuck behind traffic collapse the remaining cooldown
    // and attempt a dodge at once; a pending blocked-retry delay still holds.
    if braking && v.behavior == Behavior::Aggressive && v.lane_timer > config.lane_change_retry_delay
    {
        v.lane_timer = 0.0;
    }

    if !vehicles[idx].changing_lane && vehicles[idx].lane_timer <= 0.0 {
        decide_lane_change(vehicles, idx, config);
    }

    let v = &mut vehicles[idx];
    if v.changing_lane {
        let target_x = config.lanes[v.target_lane];
        let alpha = 1.0 - (-config.lane_change_rate * dt).exp();
        v.x += (target_x - v.x) * alpha;
        if (target_x - v.x).abs() < config.lane_change_epsilon {
            v.x = target_x;
            v.lane = v.target_lane;
            v.changing_lane = false;
        }
    }

    // Same-direction traffic: net drift toward the player is the speed deficit
    // against the world scroll.
    v.z += (world_speed - v.speed) * dt;
}

/// Lowest speed ceiling imposed by neighbors ahead in the target lane,
/// or None when the lane ahead is clear.
fn follow_ceiling(vehicles: &[Vehicle], idx: usize, config: &SimConfig) -> Option<f32> {
    let v = &vehicles[idx];
    let target_x = config.lanes[v.target_lane];
    let mut ceiling: Option<f32> = None;

    for (j, other) in vehicles.iter().enumerate() {
        if j == idx {
            continue;
        }
        if (other.x - target_x).abs() > config.lane_occupancy_threshold {
            continue;
        }
        // Ahead in the travel direction = smaller z.
        let gap = v.z - other.z;
        if gap <= 0.0 || gap > config.brake_distance {
            continue;
        }
        let mut cap = other.speed * config.brake_speed_factor;
        if gap < config.critical_distance {
            cap *= 0.5;
        }
        ceiling = Some(ceiling.map_or(cap, |c: f32| c.min(cap)));
    }

    ceiling
}

/// Attempt a lane change: pick an unblocked neighbor lane, or arm the retry
/// delay when every candidate is blocked.
fn decide_lane_change(vehicles: &mut [Vehicle], idx: usize, config: &SimConfig) {
    let lane = vehicles[idx].lane;
    let mut open = [0usize; 2];
    let mut open_count = 0;

    if lane > 0 && !lane_blocked(vehicles, idx, lane - 1, config) {
        open[open_count] = lane - 1;
        open_count += 1;
    }
    if lane + 1 < config.lanes.len() && !lane_blocked(vehicles, idx, lane + 1, config) {
        open[open_count] = lane + 1;
        open_count += 1;
    }

    let v = &mut vehicles[idx];
    if open_count == 0 {
        v.lane_timer = config.lane_change_retry_delay;
        return;
    }

    let choice = if open_count == 2 && rand::random::<bool>() {
        open[1]
    } else {
        open[0]
    };
    v.target_lane = choice;
    v.changing_lane = true;
    let (min, max) = config.lane_change_cooldown;
    v.lane_timer = min + rand::random::<f32>() * (max - min);
}

/// A candidate lane is blocked when any other vehicle sits inside the
/// safety box around the target lane position.
fn lane_blocked(vehicles: &[Vehicle], idx: usize, lane: usize, config: &SimConfig) -> bool {
    let v = &vehicles[idx];
    let lane_x = config.lanes[lane];
    vehicles.iter().enumerate().any(|(j, other)| {
        if j == idx {
            return false;
        }
        if (other.x - lane_x).abs() > config.safety_box_lateral {
            return false;
        }
        let gap = v.z - other.z;
        gap < config.safety_box_ahead && gap > -config.safety_box_behind
    })
}
