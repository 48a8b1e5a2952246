//! Dodge Rush core crate.
//!
//! A car dodges falling obstacles on a canvas: obstacles that scroll past
//! the car score points, a five-second timer escalates difficulty, and final
//! scores land on a persisted top-10 leaderboard (localStorage, optionally
//! mirrored to a remote shared store). The simulation modules under `game`
//! and the leaderboard core are plain Rust and run under native `cargo test`;
//! browser glue lives in `app`, `render` and `leaderboard::remote`.

use wasm_bindgen::prelude::*;

pub mod game;
pub mod leaderboard;

mod app;
mod render;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Entry points
// -----------------------------------------------------------------------------

/// Start (or restart) a session with the default configuration:
/// points-escalation difficulty and a local + remote leaderboard.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    app::start(game::GameConfig::default())
}

/// Start with explicit variants. `difficulty` is `"points"` or `"size"`;
/// `leaderboard` is `"none"`, `"local"` or `"local+remote"`; `remote_url` is
/// the shared store endpoint (only used when the scope mirrors remotely).
#[wasm_bindgen]
pub fn start_game_with(
    difficulty: &str,
    leaderboard: &str,
    remote_url: Option<String>,
) -> Result<(), JsValue> {
    let config = game::GameConfig {
        difficulty_variant: parse_difficulty(difficulty)?,
        leaderboard_scope: parse_scope(leaderboard)?,
        remote_url,
    };
    app::start(config)
}

/// Repaint the leaderboard panel. `scope` is `"local"` (synchronous, from
/// persisted state) or `"global"` (asynchronous; the panel repaints when the
/// fetch resolves).
#[wasm_bindgen]
pub fn show_leaderboard(scope: &str, remote_url: Option<String>) -> Result<(), JsValue> {
    match scope {
        "local" => leaderboard::show_local(),
        "global" => {
            let url =
                remote_url.ok_or_else(|| JsValue::from_str("global scope needs a remote URL"))?;
            leaderboard::remote::spawn_refresh_panel(&url);
            Ok(())
        }
        other => Err(JsValue::from_str(&format!(
            "unknown leaderboard scope '{other}'"
        ))),
    }
}

/// Empty the locally persisted leaderboard and repaint the panel. The shared
/// remote store is never cleared from here.
#[wasm_bindgen]
pub fn clear_leaderboard() -> Result<(), JsValue> {
    leaderboard::LocalScores::open()?.clear()?;
    leaderboard::show_local()
}

fn parse_difficulty(s: &str) -> Result<game::DifficultyVariant, JsValue> {
    match s {
        "points" | "grow-points" => Ok(game::DifficultyVariant::GrowPoints),
        "size" | "grow-size" => Ok(game::DifficultyVariant::GrowSize),
        other => Err(JsValue::from_str(&format!(
            "unknown difficulty variant '{other}'"
        ))),
    }
}

fn parse_scope(s: &str) -> Result<leaderboard::LeaderboardScope, JsValue> {
    match s {
        "none" => Ok(leaderboard::LeaderboardScope::None),
        "local" => Ok(leaderboard::LeaderboardScope::Local),
        "local+remote" | "remote" => Ok(leaderboard::LeaderboardScope::LocalAndRemote),
        other => Err(JsValue::from_str(&format!(
            "unknown leaderboard scope '{other}'"
        ))),
    }
}
