//! Midnight Racer - Tauri Backend
//!
//! Hosts the driving simulation core and the commands the JS frontend uses
//! to drive it: the frontend ticks the server once per rendering frame,
//! injects steering on key events, and renders the returned snapshots.

mod sim;

use sim::round::{GameStatus, RoundSnapshot};
use sim::server::{GameServer, ServerStats, TickReport};
use sim::{SimConfig, SteerInput};
use std::sync::Mutex;
use tauri::State;

/// Create a round with the given configuration (defaults when omitted)
#[tauri::command]
fn init_round(
    server: State<'_, Mutex<GameServer>>,
    config: Option<SimConfig>,
) -> Result<(), String> {
    let mut server = server.lock().map_err(|e| e.to_string())?;
    server.init_round(config.unwrap_or_default())?;
    log::info!("Round initialized");
    Ok(())
}

/// Start (or restart) play on the current round
#[tauri::command]
fn start_round(server: State<'_, Mutex<GameServer>>) -> Result<(), String> {
    let mut server = server.lock().map_err(|e| e.to_string())?;
    server.start_round();
    log::info!("Round started");
    Ok(())
}

/// Perform a simulation tick and return the snapshot plus one-shot events
#[tauri::command]
fn tick(server: State<'_, Mutex<GameServer>>) -> Result<Option<TickReport>, String> {
    let mut server = server.lock().map_err(|e| e.to_string())?;
    Ok(server.tick())
}

/// Inject the current steering intent
#[tauri::command]
fn set_steering(
    server: State<'_, Mutex<GameServer>>,
    left: bool,
    right: bool,
) -> Result<(), String> {
    let mut server = server.lock().map_err(|e| e.to_string())?;
    server.set_steering(SteerInput { left, right });
    Ok(())
}

/// Get current snapshot without advancing the simulation
#[tauri::command]
fn get_snapshot(server: State<'_, Mutex<GameServer>>) -> Result<Option<RoundSnapshot>, String> {
    let server = server.lock().map_err(|e| e.to_string())?;
    Ok(server.snapshot())
}

/// Get current round status
#[tauri::command]
fn get_status(server: State<'_, Mutex<GameServer>>) -> Result<GameStatus, String> {
    let server = server.lock().map_err(|e| e.to_string())?;
    Ok(server.status())
}

/// Get server statistics
#[tauri::command]
fn get_stats(server: State<'_, Mutex<GameServer>>) -> Result<ServerStats, String> {
    let server = server.lock().map_err(|e| e.to_string())?;
    Ok(server.stats())
}

/// Pause the simulation
#[tauri::command]
fn pause_round(server: State<'_, Mutex<GameServer>>) -> Result<(), String> {
    let mut server = server.lock().map_err(|e| e.to_string())?;
    server.pause();
    log::info!("Round paused");
    Ok(())
}

/// Resume the simulation
#[tauri::command]
fn resume_round(server: State<'_, Mutex<GameServer>>) -> Result<(), String> {
    let mut server = server.lock().map_err(|e| e.to_string())?;
    server.resume();
    log::info!("Round resumed");
    Ok(())
}

/// Reset to the start menu
#[tauri::command]
fn reset_round(server: State<'_, Mutex<GameServer>>) -> Result<(), String> {
    let mut server = server.lock().map_err(|e| e.to_string())?;
    server.reset();
    log::info!("Round reset");
    Ok(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .manage(Mutex::new(GameServer::new()))
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            log::info!("Midnight Racer game server initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            init_round,
            start_round,
            tick,
            set_steering,
            get_snapshot,
            get_status,
            get_stats,
            pause_round,
            resume_round,
            reset_round,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application")
}
