//! Collision detection and vehicle lifecycle.
//!
//! The player sits at z = 0; overlap is an axis-aligned box test against
//! per-kind half-extents with a small slack so glancing pixel-perfect
//! contact does not end the round. Despawn removes vehicles that left the
//! simulated corridor on either side.

use crate::sim::config::SimConfig;
use crate::sim::player::PlayerState;
use crate::sim::vehicle::{Vehicle, VehicleId};

/// Axis-aligned overlap between the player hull and one vehicle.
pub fn player_overlaps(player: &PlayerState, vehicle: &Vehicle, config: &SimConfig) -> bool {
    let dx = (vehicle.x - player.x).abs();
    let dz = vehicle.z.abs();
    dx < config.player_half_width + vehicle.kind.half_width() - config.collision_slack_lateral
        && dz < config.player_half_length + vehicle.kind.half_length()
            - config.collision_slack_longitudinal
}

/// First vehicle overlapping the player, if any. Later overlaps in the same
/// step are irrelevant: one collision ends the round.
pub fn find_collision(
    player: &PlayerState,
    vehicles: &[Vehicle],
    config: &SimConfig,
) -> Option<VehicleId> {
    vehicles
        .iter()
        .find(|v| player_overlaps(player, v, config))
        .map(|v| v.id)
}

/// Drop vehicles past either despawn boundary; returns how many were removed.
pub fn despawn_exited(vehicles: &mut Vec<Vehicle>, config: &SimConfig) -> usize {
    let before = vehicles.len();
    let ahead_z = config.despawn_ahead_z();
    vehicles.retain(|v| v.z <= config.despawn_behind_z && v.z >= ahead_z);
    before - vehicles.len()
}
