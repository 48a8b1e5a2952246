//! Leaderboard store: a top-10 score list persisted as JSON under a single
//! localStorage key, plus the overlay panel that displays it. The ordering,
//! serialization and markup helpers are plain Rust so they run under native
//! `cargo test`; only [`LocalScores`] and [`paint_panel`] touch the browser.
//! Best-effort mirroring to a remote shared store lives in [`remote`].

pub mod remote;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use web_sys::Storage;

pub const MAX_ENTRIES: usize = 10;
/// Sentinel used when the player leaves the name prompt blank.
pub const ANONYMOUS_NAME: &str = "Unknown";
pub const STORAGE_KEY: &str = "dodge_rush_leaderboard";
pub const PANEL_ID: &str = "dr-leaderboard";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    /// Blank or whitespace-only names collapse to [`ANONYMOUS_NAME`].
    pub fn new(name: &str, score: u64) -> Self {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            ANONYMOUS_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        Self { name, score }
    }
}

/// Where finished sessions record their score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LeaderboardScope {
    None,
    Local,
    #[default]
    LocalAndRemote,
}

// --- Pure core ----------------------------------------------------------------

/// Add one entry, keeping the list sorted descending by score and truncated
/// to [`MAX_ENTRIES`]. The sort is stable, so equal scores keep their
/// insertion order.
pub fn insert(mut entries: Vec<LeaderboardEntry>, entry: LeaderboardEntry) -> Vec<LeaderboardEntry> {
    entries.push(entry);
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_ENTRIES);
    entries
}

/// Absent or corrupt persisted data reads as an empty leaderboard, never an
/// error.
pub fn parse(json: Option<&str>) -> Vec<LeaderboardEntry> {
    json.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

pub fn to_json(entries: &[LeaderboardEntry]) -> String {
    serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_string())
}

/// Markup for the overlay panel. Names come from a free-text prompt, so they
/// are escaped before landing in innerHTML.
pub fn panel_html(heading: &str, entries: &[LeaderboardEntry]) -> String {
    let mut html = format!("<h2>{heading}</h2><ol>");
    for entry in entries {
        html.push_str(&format!("<li>{}: {}</li>", escape(&entry.name), entry.score));
    }
    html.push_str("</ol>");
    html
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

// --- localStorage-backed store -------------------------------------------------

pub struct LocalScores {
    storage: Storage,
}

impl LocalScores {
    pub fn open() -> Result<Self, JsValue> {
        let storage = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;
        Ok(Self { storage })
    }

    /// Append, re-sort, truncate, persist.
    pub fn record(&self, entry: LeaderboardEntry) -> Result<(), JsValue> {
        let entries = insert(self.list(), entry);
        self.storage.set_item(STORAGE_KEY, &to_json(&entries))
    }

    /// Synchronous read of the persisted top list.
    pub fn list(&self) -> Vec<LeaderboardEntry> {
        let json = self.storage.get_item(STORAGE_KEY).ok().flatten();
        parse(json.as_deref())
    }

    /// Empties local persisted state only; a remote store is never cleared
    /// from here.
    pub fn clear(&self) -> Result<(), JsValue> {
        self.storage.remove_item(STORAGE_KEY)
    }
}

// --- Overlay panel -------------------------------------------------------------

/// Find or create the panel div and fill it with the given entries.
pub fn paint_panel(heading: &str, entries: &[LeaderboardEntry]) -> Result<(), JsValue> {
    let doc = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let panel = if let Some(el) = doc.get_element_by_id(PANEL_ID) {
        el
    } else {
        let div = doc.create_element("div")?;
        div.set_id(PANEL_ID);
        div.set_attribute("style", "position:fixed; top:10px; right:12px; min-width:180px; font-family:'Fira Code', monospace; font-size:14px; padding:8px 14px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45;").ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&div)?;
        div
    };
    panel.set_inner_html(&panel_html(heading, entries));
    Ok(())
}

/// Repaint the panel from local persisted state. A missing or unreadable
/// store shows an empty list.
pub fn show_local() -> Result<(), JsValue> {
    let entries = LocalScores::open()
        .map(|store| store.list())
        .unwrap_or_default();
    paint_panel("Leaderboard", &entries)
}
