//! Round orchestration.
//!
//! One `Round` is the whole simulation state for one run. `update` is the
//! single entry point: given clamped elapsed time and steering input it
//! advances every component in the required order and returns the one-shot
//! events the frontend consumes.

use serde::{Deserialize, Serialize};

use crate::sim::ai;
use crate::sim::collision;
use crate::sim::config::SimConfig;
use crate::sim::input::SteerInput;
use crate::sim::player::{PlayerSnapshot, PlayerState};
use crate::sim::progression::Progression;
use crate::sim::traffic::TrafficSpawner;
use crate::sim::vehicle::{Vehicle, VehicleIdGen, VehicleSnapshot};

/// Round lifecycle status. The step function only does work in `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Start,
    Playing,
    GameOver,
}

/// One-shot events produced by a step, delivered to the UI exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    SpeedLevelUp { level: u32, speed: f32 },
    GameOver { score: u32 },
}

/// Complete simulation state for one run.
#[derive(Debug, Clone)]
pub struct Round {
    pub config: SimConfig,
    pub status: GameStatus,
    pub player: PlayerState,
    pub vehicles: Vec<Vehicle>,
    pub progression: Progression,
    pub elapsed: f32,
    spawner: TrafficSpawner,
    ids: VehicleIdGen,
    game_over: bool,
}

impl Round {
    pub fn new(config: SimConfig) -> Self {
        let progression = Progression::new(&config);
        let spawner = TrafficSpawner::new(&config);
        Self {
            config,
            status: GameStatus::Start,
            player: PlayerState::default(),
            vehicles: Vec::new(),
            progression,
            elapsed: 0.0,
            spawner,
            ids: VehicleIdGen::default(),
            game_over: false,
        }
    }

    /// Transition to `Playing`, atomically resetting all transient state.
    pub fn start(&mut self) {
        self.status = GameStatus::Playing;
        self.player.reset();
        self.vehicles.clear();
        self.progression = Progression::new(&self.config);
        self.spawner.reset(&self.config);
        self.ids = VehicleIdGen::default();
        self.elapsed = 0.0;
        self.game_over = false;
    }

    /// Back to the start menu; transient state cleared.
    pub fn reset(&mut self) {
        self.start();
        self.status = GameStatus::Start;
    }

    /// Current HUD score.
    pub fn score(&self) -> u32 {
        self.progression.distance.max(0.0).floor() as u32
    }

    /// Advance the simulation one frame.
    ///
    /// Component order is load-bearing: progression updates world speed
    /// before the spawner and traffic consume it, and collision runs after
    /// every position for the step is final.
    pub fn update(&mut self, dt: f32, input: SteerInput) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.status != GameStatus::Playing || self.game_over {
            return events;
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.dt_max)
        } else {
            0.0
        };
        self.elapsed += dt;

        self.player.update(input, dt, &self.config);
        self.progression.update(dt, &self.config, &mut events);

        let world_speed = self.progression.world_speed;
        if let Some(vehicle) = self
            .spawner
            .update(dt, world_speed, &self.config, &mut self.ids)
        {
            self.vehicles.push(vehicle);
        }

        for idx in 0..self.vehicles.len() {
            ai::update_vehicle(&mut self.vehicles, idx, dt, world_speed, &self.config);
        }

        collision::despawn_exited(&mut self.vehicles, &self.config);

        if self.elapsed >= self.config.invincibility_secs
            && collision::find_collision(&self.player, &self.vehicles, &self.config).is_some()
        {
            self.game_over = true;
            self.status = GameStatus::GameOver;
            self.vehicles.clear();
            events.push(SimEvent::GameOver {
                score: self.score(),
            });
        }

        events
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            status: self.status,
            score: self.score(),
            distance: self.progression.distance,
            world_speed: self.progression.world_speed,
            speed_ratio: self.config.speed_ratio(self.progression.world_speed),
            level: self.progression.milestone,
            elapsed: self.elapsed,
            invincible: self.status == GameStatus::Playing
                && self.elapsed < self.config.invincibility_secs,
            player: self.player.snapshot(&self.config),
            vehicles: self
                .vehicles
                .iter()
                .map(|v| v.snapshot(&self.config, self.elapsed))
                .collect(),
        }
    }
}

/// Compact per-step view for the renderer, HUD, and audio layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub status: GameStatus,
    pub score: u32,
    pub distance: f32,
    pub world_speed: f32,
    /// World speed over base speed; the audio layer maps this to engine pitch.
    pub speed_ratio: f32,
    pub level: u32,
    pub elapsed: f32,
    pub invincible: bool,
    pub player: PlayerSnapshot,
    pub vehicles: Vec<VehicleSnapshot>,
}
