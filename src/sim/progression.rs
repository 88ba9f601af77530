//! Distance tracking and milestone-based speed progression.

use serde::{Deserialize, Serialize};

use crate::sim::config::SimConfig;
use crate::sim::round::SimEvent;

/// Cumulative distance, current world speed, and the last milestone seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub distance: f32,
    pub world_speed: f32,
    pub milestone: u32,
}

impl Progression {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            distance: 0.0,
            world_speed: config.base_speed,
            milestone: 0,
        }
    }

    /// Integrate distance and fire one level-up per milestone crossed.
    ///
    /// The catch-up loop steps `milestone` one boundary at a time, so a large
    /// dt that jumps several boundaries still emits every level-up exactly
    /// once, and a boundary landed on exactly fires exactly once.
    pub fn update(&mut self, dt: f32, config: &SimConfig, events: &mut Vec<SimEvent>) {
        self.distance += self.world_speed * dt;

        let crossed = (self.distance / config.milestone_distance).floor() as u32;
        while self.milestone < crossed {
            self.milestone += 1;
            self.world_speed = (self.world_speed + config.speed_increment).min(config.max_speed);
            events.push(SimEvent::SpeedLevelUp {
                level: self.milestone,
                speed: self.world_speed,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_integrates_world_speed() {
        let config = SimConfig::default();
        let mut p = Progression::new(&config);
        let mut events = Vec::new();
        p.update(0.5, &config, &mut events);
        assert_eq!(p.distance, config.base_speed * 0.5);
        assert!(events.is_empty());
    }

    #[test]
    fn exact_boundary_fires_exactly_once() {
        let config = SimConfig::default();
        let mut p = Progression::new(&config);
        let mut events = Vec::new();
        // 280 + 40 * 0.5 lands exactly on the 300 boundary.
        p.distance = config.milestone_distance - config.base_speed * 0.5;
        p.update(0.5, &config, &mut events);
        assert_eq!(events.len(), 1);
        assert_eq!(p.milestone, 1);
        assert_eq!(p.world_speed, config.base_speed + config.speed_increment);

        // The next small step must not re-fire the same milestone.
        events.clear();
        p.update(0.016, &config, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn huge_step_emits_every_crossed_milestone() {
        let config = SimConfig::default();
        let mut p = Progression::new(&config);
        let mut events = Vec::new();
        // Jump across two boundaries in one step.
        p.update(2.5 * config.milestone_distance / config.base_speed, &config, &mut events);
        assert_eq!(events.len(), 2);
        assert_eq!(p.milestone, 2);
    }

    #[test]
    fn world_speed_caps_at_max() {
        let config = SimConfig::default();
        let mut p = Progression::new(&config);
        let mut events = Vec::new();
        for _ in 0..100 {
            p.distance += config.milestone_distance;
            p.update(0.0, &config, &mut events);
        }
        assert_eq!(p.world_speed, config.max_speed);
    }

    #[test]
    fn world_speed_is_monotonic() {
        let config = SimConfig::default();
        let mut p = Progression::new(&config);
        let mut events = Vec::new();
        let mut last = p.world_speed;
        for _ in 0..10_000 {
            p.update(0.1, &config, &mut events);
            assert!(p.world_speed >= last);
            last = p.world_speed;
        }
    }
}
