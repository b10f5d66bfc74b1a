//! Browser shell: DOM elements, keyboard listener, tick timer and redraw loop.
//!
//! One [`GameLoop`] lives in a thread-local and is shared by three JS
//! callbacks. The interval callback is the only one that advances the game;
//! the animation-frame callback just draws, and `keydown` changes heading or
//! restarts after game over.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, window};

use crate::config::GameConfig;
use crate::game::{GameLoop, Segment};
use crate::render::{RenderSink, draw_frame};

const CANVAS_ID: &str = "snake-canvas";
const STATS_ID: &str = "stats-message";
const GAME_OVER_ID: &str = "game-over";
const GAME_OVER_TEXT: &str = "Game over! Press any key to play again.";

struct CanvasSink {
    ctx: CanvasRenderingContext2d,
}

impl RenderSink for CanvasSink {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_cell(&mut self, at: Segment, size: f64, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.fill_rect(at.x as f64, at.y as f64, size, size);
    }
}

struct Shell {
    game: GameLoop,
    sink: CanvasSink,
    stats_el: HtmlElement,
    game_over_el: HtmlElement,
    interval: Option<i32>,
}

impl Shell {
    /// Find or create the page elements for `game`; nothing is scheduled yet.
    fn new(doc: &Document, game: GameLoop) -> Result<Self, JsValue> {
        let canvas = ensure_canvas(doc, game.config())?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        let stats_el = ensure_element(doc, STATS_ID, "")?;
        let game_over_el = ensure_element(doc, GAME_OVER_ID, GAME_OVER_TEXT)?;
        let shell = Shell {
            game,
            sink: CanvasSink { ctx },
            stats_el,
            game_over_el,
            interval: None,
        };
        shell.show_stats();
        shell.show_game_over(false);
        Ok(shell)
    }

    fn redraw(&mut self) {
        self.sink.ctx.save();
        draw_frame(&self.game, &mut self.sink);
        self.sink.ctx.restore();
    }

    fn show_stats(&self) {
        self.stats_el
            .set_text_content(Some(&self.game.stats().to_string()));
    }

    fn show_game_over(&self, visible: bool) {
        let classes = self.game_over_el.class_list();
        if visible {
            classes.remove_1("hidden").ok();
        } else {
            classes.add_1("hidden").ok();
        }
        self.game_over_el.set_hidden(!visible);
    }

    fn on_tick(&mut self) {
        let report = self.game.tick();
        if report.ate {
            self.show_stats();
        }
        if report.died {
            self.show_game_over(true);
            self.stop_timer();
        }
    }

    fn on_key(&mut self, key: &str) {
        if self.game.is_alive() {
            self.game.handle_key(key);
            return;
        }
        // Any key restarts; the key itself is consumed.
        self.show_game_over(false);
        self.game.restart();
        self.show_stats();
        if let Err(e) = self.start_timer() {
            log::error!("could not re-arm tick timer: {:?}", e);
        }
    }

    fn start_timer(&mut self) -> Result<(), JsValue> {
        self.stop_timer();
        install_tick_callback();
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let handle = TICK_CALLBACK.with(|cb| {
            let cb = cb.borrow();
            let cb = cb
                .as_ref()
                .ok_or_else(|| JsValue::from_str("tick callback missing"))?;
            win.set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                self.game.config().tick_ms,
            )
        })?;
        log::debug!("tick timer armed every {}ms", self.game.config().tick_ms);
        self.interval = Some(handle);
        Ok(())
    }

    fn stop_timer(&mut self) {
        if let (Some(handle), Some(win)) = (self.interval.take(), window()) {
            win.clear_interval_with_handle(handle);
        }
    }
}

thread_local! {
    static SHELL: RefCell<Option<Shell>> = const { RefCell::new(None) };
    static TICK_CALLBACK: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
    static KEY_CALLBACK: RefCell<Option<Closure<dyn FnMut(web_sys::KeyboardEvent)>>> =
        const { RefCell::new(None) };
}

/// Build everything first and publish the shell last, so a failed start
/// leaves no state behind and can be retried.
pub fn start(config: GameConfig) -> Result<(), JsValue> {
    if SHELL.with(|s| s.borrow().is_some()) {
        return Err(JsValue::from_str("game already started"));
    }
    let game = GameLoop::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let mut shell = Shell::new(&doc, game)?;
    shell.start_timer()?;
    if let Err(e) = listen_for_keys(&doc) {
        shell.stop_timer();
        return Err(e);
    }
    log::info!("snake started, {}", shell.game.stats());
    SHELL.with(|s| s.replace(Some(shell)));
    start_redraw_loop();
    Ok(())
}

/// Current stats as a JSON object, e.g. `{"length":3,"score":0}`.
#[cfg(feature = "serde_json")]
pub fn stats_json() -> Result<String, JsValue> {
    SHELL.with(|s| {
        let s = s.borrow();
        let shell = s
            .as_ref()
            .ok_or_else(|| JsValue::from_str("game not started"))?;
        serde_json::to_string(&shell.game.stats()).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

fn install_tick_callback() {
    TICK_CALLBACK.with(|cb| {
        if cb.borrow().is_some() {
            return;
        }
        cb.replace(Some(Closure::wrap(Box::new(|| {
            SHELL.with(|s| {
                if let Some(shell) = s.borrow_mut().as_mut() {
                    shell.on_tick();
                }
            });
        }) as Box<dyn FnMut()>)));
    });
}

// Keyboard listener: heading while alive, restart after game over.
// Registered once per page even if an earlier start attempt failed later on.
fn listen_for_keys(doc: &Document) -> Result<(), JsValue> {
    KEY_CALLBACK.with(|cb| {
        if cb.borrow().is_some() {
            return Ok(());
        }
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            SHELL.with(|s| {
                if let Some(shell) = s.borrow_mut().as_mut() {
                    shell.on_key(&key);
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        cb.replace(Some(closure));
        Ok(())
    })
}

fn ensure_canvas(doc: &Document, config: &GameConfig) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = match doc.get_element_by_id(CANVAS_ID) {
        Some(el) => el.dyn_into()?,
        None => {
            let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
            c.set_id(CANVAS_ID);
            c.set_attribute("style", "display:block; margin:24px auto; background:#181818; border:2px solid #222;")
                .ok();
            doc.body()
                .ok_or_else(|| JsValue::from_str("no body"))?
                .append_child(&c)?;
            c
        }
    };
    canvas.set_width(config.width as u32);
    canvas.set_height(config.height as u32);
    Ok(canvas)
}

fn ensure_element(doc: &Document, id: &str, text: &str) -> Result<HtmlElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el.dyn_into()?);
    }
    let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
    el.set_id(id);
    el.set_text_content(Some(text));
    el.set_attribute("style", "text-align:center; font-family:'Fira Code', monospace; font-size:15px; color:#ddf0cd; margin:8px;")
        .ok();
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&el)?;
    Ok(el)
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_redraw_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        SHELL.with(|s| {
            if let Some(shell) = s.borrow_mut().as_mut() {
                shell.redraw();
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            w.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        w.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
    }
}
