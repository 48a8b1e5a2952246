//! Best-effort mirror of the leaderboard to a remote shared store.
//!
//! Writes and reads run as detached tasks: the frame loop never awaits them,
//! there is no retry and no timeout, and every failure drains into the log
//! sink. A read issued right after a write may not reflect it; whatever the
//! store returns last is what the panel shows.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::{LeaderboardEntry, MAX_ENTRIES};

/// POST one entry to the shared store, fire-and-forget.
pub fn spawn_record(url: &str, entry: LeaderboardEntry) {
    let url = url.to_string();
    spawn_local(async move {
        if let Err(err) = post_entry(&url, &entry).await {
            log::warn!("remote score write failed: {err:?}");
        }
    });
}

/// Fetch the shared top list and repaint the panel when (and if) the
/// response arrives.
pub fn spawn_refresh_panel(url: &str) {
    let url = url.to_string();
    spawn_local(async move {
        match fetch_top(&url).await {
            Ok(entries) => {
                if let Err(err) = super::paint_panel("Global Leaderboard", &entries) {
                    log::warn!("leaderboard panel update failed: {err:?}");
                }
            }
            Err(err) => log::warn!("remote score read failed: {err:?}"),
        }
    });
}

async fn post_entry(url: &str, entry: &LeaderboardEntry) -> Result<(), JsValue> {
    let body = serde_json::to_string(entry).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));
    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;
    let resp = send(request).await?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "unexpected status {}",
            resp.status()
        )));
    }
    Ok(())
}

/// GET the shared collection and reduce it to the display shape: sorted
/// descending by score, at most [`MAX_ENTRIES`]. A body that fails to parse
/// reads as empty, same as the local store.
async fn fetch_top(url: &str) -> Result<Vec<LeaderboardEntry>, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    let request = Request::new_with_str_and_init(url, &opts)?;
    let resp = send(request).await?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "unexpected status {}",
            resp.status()
        )));
    }
    let text = JsFuture::from(resp.text()?).await?;
    let mut entries = super::parse(text.as_string().as_deref());
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_ENTRIES);
    Ok(entries)
}

async fn send(request: Request) -> Result<Response, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp = JsFuture::from(window.fetch_with_request(&request)).await?;
    resp.dyn_into::<Response>()
        .map_err(|_| JsValue::from_str("fetch did not yield a Response"))
}
