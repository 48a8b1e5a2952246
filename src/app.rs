//! Browser driver: owns the canvas, the two sprite images, the pointer
//! listener, and the requestAnimationFrame cycle. The simulation in
//! `crate::game` never touches the DOM; this module feeds it wall-clock
//! deltas and `Math.random` and paints the result.
//!
//! Lifecycle: `start()` resets the session state and waits for both sprite
//! images to report loaded before the first frame. Each tick advances the
//! simulation, renders, and reschedules itself; a collision stops the cycle,
//! records the score, and leaves the leaderboard panel on screen. Calling
//! `start()` again relaunches cleanly.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, window};

use crate::game::{GameConfig, GameState};
use crate::leaderboard::{self, LeaderboardEntry, LeaderboardScope, LocalScores, remote};
use crate::render::{self, Surface};

const CANVAS_ID: &str = "dr-canvas";
const CANVAS_WIDTH: u32 = 480;
const CANVAS_HEIGHT: u32 = 640;

const CAR_IMAGE_ID: &str = "dr-car";
const CAR_IMAGE_SRC: &str = "car.png";
const OBSTACLE_IMAGE_ID: &str = "dr-obstacle";
const OBSTACLE_IMAGE_SRC: &str = "obstacle.png";

/// Driver lifecycle. Idle until the sprite images are ready, Running while
/// the frame cycle is scheduled, GameOver once a collision ended the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    GameOver,
}

struct App {
    canvas: HtmlCanvasElement,
    surface: Surface,
    car_img: HtmlImageElement,
    obstacle_img: HtmlImageElement,
    config: GameConfig,
    state: GameState,
    phase: Phase,
    last_ts: Option<f64>,
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
    // One rAF chain at a time; reset when the chain ends so restart works.
    static LOOP_SCHEDULED: Cell<bool> = Cell::new(false);
    static INPUT_WIRED: Cell<bool> = Cell::new(false);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

// --- Session setup ------------------------------------------------------------

pub fn start(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = find_or_create_canvas(&doc)?;
    let car_img = find_or_create_image(&doc, CAR_IMAGE_ID, CAR_IMAGE_SRC)?;
    let obstacle_img = find_or_create_image(&doc, OBSTACLE_IMAGE_ID, OBSTACLE_IMAGE_SRC)?;

    let ctx: web_sys::CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    let surface = Surface::new(ctx, canvas.width() as f64, canvas.height() as f64);

    let state = GameState::new(
        canvas.width() as f64,
        canvas.height() as f64,
        config.difficulty_variant,
    );

    // Page-load behavior: show the persisted leaderboard right away; the
    // remote refresh repaints whenever (if ever) the fetch resolves.
    if config.leaderboard_scope != LeaderboardScope::None {
        leaderboard::show_local().ok();
        if config.leaderboard_scope == LeaderboardScope::LocalAndRemote {
            if let Some(url) = config.remote_url.as_deref() {
                remote::spawn_refresh_panel(url);
            }
        }
    }

    let app = App {
        canvas,
        surface,
        car_img: car_img.clone(),
        obstacle_img: obstacle_img.clone(),
        config,
        state,
        phase: Phase::Idle,
        last_ts: None,
    };
    APP.with(|slot| slot.replace(Some(app)));

    start_when_ready(car_img, obstacle_img);
    Ok(())
}

fn find_or_create_canvas(doc: &Document) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_width(CANVAS_WIDTH);
        c.set_height(CANVAS_HEIGHT);
        c.set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); background:#181818; border:2px solid #222; border-radius:12px; z-index:20;").ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    // A restart after game-over has to undo the hide.
    canvas.remove_attribute("hidden").ok();
    wire_pointer_input(&canvas)?;
    Ok(canvas)
}

fn find_or_create_image(
    doc: &Document,
    id: &str,
    src: &str,
) -> Result<HtmlImageElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return el
            .dyn_into()
            .map_err(|_| JsValue::from_str("element is not an <img>"));
    }
    let img = HtmlImageElement::new()?;
    img.set_id(id);
    img.set_src(src);
    Ok(img)
}

/// Pointer input: mousemove on the canvas feeds the car's clamped x. Wired
/// once per page; restarts reuse the same listener.
fn wire_pointer_input(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    if INPUT_WIRED.with(|f| f.replace(true)) {
        return Ok(());
    }
    let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        // offset coordinates are canvas-local; no DomRect needed.
        let x = evt.offset_x() as f64;
        APP.with(|slot| {
            if let Some(app) = slot.borrow_mut().as_mut() {
                app.state.set_pointer_x(x);
            }
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// --- Resource-ready join -------------------------------------------------------

/// Explicit ready-state join on the two sprite loads: already-decoded images
/// count immediately, the rest decrement a shared pending counter from their
/// onload callback, and the frame cycle begins when it reaches zero.
fn start_when_ready(car: HtmlImageElement, obstacle: HtmlImageElement) {
    let pending = Rc::new(Cell::new(0u32));
    for img in [&car, &obstacle] {
        if img.complete() {
            continue;
        }
        pending.set(pending.get() + 1);
        let pending = pending.clone();
        let closure = Closure::wrap(Box::new(move || {
            pending.set(pending.get() - 1);
            if pending.get() == 0 {
                begin_running();
            }
        }) as Box<dyn FnMut()>);
        img.set_onload(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
    }
    if pending.get() == 0 {
        begin_running();
    }
}

fn begin_running() {
    APP.with(|slot| {
        if let Some(app) = slot.borrow_mut().as_mut() {
            app.phase = Phase::Running;
            app.last_ts = None;
            log::info!(
                "session started ({:?}, {:?})",
                app.config.difficulty_variant,
                app.config.leaderboard_scope
            );
        }
    });
    schedule_loop();
}

// --- Frame cycle ---------------------------------------------------------------

fn schedule_loop() {
    if LOOP_SCHEDULED.with(|f| f.replace(true)) {
        return;
    }
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let keep_going = APP.with(|slot| match slot.borrow_mut().as_mut() {
            Some(app) => tick(app, ts),
            None => false,
        });
        if keep_going {
            if let Some(w) = window() {
                let _ = w
                    .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
                return;
            }
        }
        LOOP_SCHEDULED.with(|flag| flag.set(false));
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// One frame: delta time, simulation update, render. Returns whether the
/// cycle should reschedule.
fn tick(app: &mut App, ts: f64) -> bool {
    if app.phase != Phase::Running {
        return false;
    }
    let dt = match app.last_ts {
        Some(prev) => ts - prev,
        None => 0.0,
    };
    app.last_ts = Some(ts);

    let mut rng = || js_sys::Math::random();
    app.state.update(dt, &mut rng);

    if app.state.game_over {
        app.phase = Phase::GameOver;
        finish_session(app);
        return false;
    }
    render::draw_frame(&app.surface, &app.state, &app.car_img, &app.obstacle_img);
    true
}

// --- Game over -----------------------------------------------------------------

fn finish_session(app: &mut App) {
    let score = app.state.score;
    log::info!("game over, final score {score}");

    // The leaderboard panel takes over; the play surface goes away.
    app.canvas.set_attribute("hidden", "").ok();

    if app.config.leaderboard_scope == LeaderboardScope::None {
        return;
    }

    let entry = LeaderboardEntry::new(&prompt_for_name(score), score);
    match LocalScores::open() {
        Ok(store) => {
            if let Err(err) = store.record(entry.clone()) {
                log::warn!("local score write failed: {err:?}");
            }
            leaderboard::paint_panel("Leaderboard", &store.list()).ok();
        }
        Err(err) => log::warn!("localStorage unavailable: {err:?}"),
    }

    if app.config.leaderboard_scope == LeaderboardScope::LocalAndRemote {
        match app.config.remote_url.as_deref() {
            Some(url) => remote::spawn_record(url, entry),
            // Same contract as any remote-store failure: logged, local path
            // unaffected.
            None => log::warn!("remote leaderboard enabled but no URL configured"),
        }
    }
}

fn prompt_for_name(score: u64) -> String {
    window()
        .and_then(|w| {
            w.prompt_with_message(&format!(
                "Game Over! Your score: {score}\nEnter your name (or leave blank to remain anonymous):"
            ))
            .ok()
            .flatten()
        })
        .unwrap_or_default()
}
