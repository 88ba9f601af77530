//! Game server: owns the round, per-tick timing, and server statistics.
//!
//! The frontend drives `tick` once per rendering frame; the server measures
//! wall-clock delta itself, feeds the round the latest injected steering,
//! and hands back a snapshot plus the step's one-shot events.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::sim::config::SimConfig;
use crate::sim::input::SteerInput;
use crate::sim::round::{GameStatus, Round, RoundSnapshot, SimEvent};

/// Server statistics for the debug overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStats {
    pub avg_tick_time_ms: f32,
    pub vehicle_count: u32,
    pub status: GameStatus,
    pub running: bool,
}

/// One tick's worth of output for the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickReport {
    pub snapshot: RoundSnapshot,
    pub events: Vec<SimEvent>,
}

/// Main game server.
pub struct GameServer {
    /// Active round (if any).
    round: Option<Round>,
    /// Latest steering intent injected by the frontend.
    steering: SteerInput,
    /// Whether ticks advance the simulation.
    running: bool,
    /// Last tick timestamp.
    last_tick: Instant,
    /// Accumulated tick times for averaging.
    tick_times: Vec<f32>,
}

impl GameServer {
    pub fn new() -> Self {
        Self {
            round: None,
            steering: SteerInput::NEUTRAL,
            running: false,
            last_tick: Instant::now(),
            tick_times: Vec::with_capacity(60),
        }
    }

    /// Create a round with the given configuration, replacing any existing one.
    pub fn init_round(&mut self, config: SimConfig) -> Result<(), String> {
        config.validate()?;
        self.round = Some(Round::new(config));
        self.running = false;
        self.steering = SteerInput::NEUTRAL;
        Ok(())
    }

    /// Begin (or restart) play on the current round.
    pub fn start_round(&mut self) {
        if let Some(round) = &mut self.round {
            round.start();
            self.running = true;
            self.last_tick = Instant::now();
        }
    }

    pub fn set_steering(&mut self, input: SteerInput) {
        self.steering = input;
    }

    /// Perform a single simulation tick and return the resulting frontier.
    ///
    /// The measured wall-clock delta is clamped inside the round, so host
    /// stalls (backgrounded window, debugger pause) cannot tunnel the player
    /// through traffic or burst the spawner.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.running {
            return self.round.as_ref().map(|r| TickReport {
                snapshot: r.snapshot(),
                events: Vec::new(),
            });
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        let tick_start = Instant::now();

        let mut events = Vec::new();
        if let Some(round) = &mut self.round {
            events = round.update(delta, self.steering);
            if round.status == GameStatus::GameOver {
                self.running = false;
            }
        }

        let tick_time = tick_start.elapsed().as_secs_f32() * 1000.0;
        self.tick_times.push(tick_time);
        if self.tick_times.len() > 60 {
            self.tick_times.remove(0);
        }

        self.round.as_ref().map(|r| TickReport {
            snapshot: r.snapshot(),
            events,
        })
    }

    /// Current snapshot without advancing the simulation.
    pub fn snapshot(&self) -> Option<RoundSnapshot> {
        self.round.as_ref().map(|r| r.snapshot())
    }

    pub fn status(&self) -> GameStatus {
        self.round
            .as_ref()
            .map(|r| r.status)
            .unwrap_or(GameStatus::Start)
    }

    pub fn stats(&self) -> ServerStats {
        let avg_tick_time = if self.tick_times.is_empty() {
            0.0
        } else {
            self.tick_times.iter().sum::<f32>() / self.tick_times.len() as f32
        };

        ServerStats {
            avg_tick_time_ms: avg_tick_time,
            vehicle_count: self
                .round
                .as_ref()
                .map(|r| r.vehicles.len() as u32)
                .unwrap_or(0),
            status: self.status(),
            running: self.running,
        }
    }

    /// Pause the simulation.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Resume the simulation. Re-arms the tick clock so paused wall time
    /// never enters the round.
    pub fn resume(&mut self) {
        if self.status() == GameStatus::Playing {
            self.running = true;
            self.last_tick = Instant::now();
        }
    }

    /// Back to the start menu, dropping the round.
    pub fn reset(&mut self) {
        self.round = None;
        self.running = false;
        self.steering = SteerInput::NEUTRAL;
        self.tick_times.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for GameServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_without_round_is_none() {
        let mut server = GameServer::new();
        assert!(server.tick().is_none());
        assert_eq!(server.status(), GameStatus::Start);
    }

    #[test]
    fn init_rejects_invalid_config() {
        let mut server = GameServer::new();
        let config = SimConfig {
            lanes: vec![0.0],
            ..Default::default()
        };
        assert!(server.init_round(config).is_err());
        assert!(server.snapshot().is_none());
    }

    #[test]
    fn lifecycle_start_pause_resume() {
        let mut server = GameServer::new();
        server.init_round(SimConfig::default()).unwrap();
        assert!(!server.is_running());

        server.start_round();
        assert!(server.is_running());
        assert_eq!(server.status(), GameStatus::Playing);

        server.pause();
        assert!(!server.is_running());
        // A paused tick still reports a snapshot but advances nothing.
        let report = server.tick().unwrap();
        assert_eq!(report.snapshot.distance, 0.0);
        assert!(report.events.is_empty());

        server.resume();
        assert!(server.is_running());
    }

    #[test]
    fn resume_without_playing_round_stays_stopped() {
        let mut server = GameServer::new();
        server.init_round(SimConfig::default()).unwrap();
        server.resume();
        assert!(!server.is_running());
    }

    #[test]
    fn paused_wall_time_never_reaches_the_round() {
        let mut server = GameServer::new();
        server.init_round(SimConfig::default()).unwrap();
        server.start_round();
        server.pause();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let report = server.tick().unwrap();
        assert_eq!(report.snapshot.distance, 0.0);
        assert_eq!(report.snapshot.elapsed, 0.0);
    }

    #[test]
    fn tick_advances_the_round() {
        let mut server = GameServer::new();
        server.init_round(SimConfig::default()).unwrap();
        server.start_round();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let report = server.tick().unwrap();
        assert!(report.snapshot.distance > 0.0);
        assert!(server.stats().avg_tick_time_ms >= 0.0);
    }

    #[test]
    fn reset_drops_the_round() {
        let mut server = GameServer::new();
        server.init_round(SimConfig::default()).unwrap();
        server.start_round();
        server.reset();
        assert!(server.snapshot().is_none());
        assert!(!server.is_running());
        assert_eq!(server.status(), GameStatus::Start);
    }
}
