//! JavaScript bindings
//!
//! Wraps a `Session` for the browser host. Events and snapshots cross the
//! boundary as JSON strings; timestamps are `performance.now()`/`Date.now()`
//! milliseconds supplied by the caller's animation loop.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{RiskTier, Session};

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Peg board driven from a `requestAnimationFrame` loop
#[wasm_bindgen]
pub struct WebBoard {
    session: Session,
    settings: Settings,
}

#[wasm_bindgen]
impl WebBoard {
    /// Restore saved settings and build the board
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebBoard, JsValue> {
        console_error_panic_hook::set_once();
        // Ignore double init when several boards are created
        let _ = console_log::init_with_level(log::Level::Info);

        let settings = Settings::load();
        let config = settings.board_config().map_err(to_js)?;
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        log::info!("Plinko board ready (seed {})", seed);

        Ok(Self {
            session: Session::new(config, seed),
            settings,
        })
    }

    /// Rebuild pegs and payouts; fails while balls are still on the board
    pub fn configure(
        &mut self,
        rows: u32,
        risk: &str,
        width: f32,
        height: f32,
    ) -> Result<(), JsValue> {
        let risk = RiskTier::parse(risk).map_err(to_js)?;
        self.session
            .configure(rows, risk, width, height)
            .map_err(to_js)?;

        let config = *self.session.config();
        self.settings.rows = config.rows;
        self.settings.risk = config.risk;
        self.settings.canvas_width = config.canvas_width;
        self.settings.canvas_height = config.canvas_height;
        self.settings.save();
        Ok(())
    }

    /// Drop a ball; the host has already checked the balance covers `bet`
    pub fn drop_ball(&mut self, bet: i32) -> Result<u32, JsValue> {
        let id = self.session.spawn_ball(bet as i64).map_err(to_js)?;
        if self.settings.bet != bet as i64 {
            self.settings.bet = bet as i64;
            self.settings.save();
        }
        Ok(id)
    }

    /// Advance one frame; returns a JSON array of settlements
    pub fn step(&mut self, now: f64) -> Result<String, JsValue> {
        let settlements = self.session.step(now);
        serde_json::to_string(&settlements).map_err(to_js)
    }

    /// JSON snapshot of pegs, slots, payouts and balls
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(to_js)
    }

    pub fn is_idle(&self) -> bool {
        self.session.is_idle()
    }

    pub fn active_balls(&self) -> usize {
        self.session.active_balls()
    }

    /// Last bet the player used
    pub fn saved_bet(&self) -> i32 {
        self.settings.bet.clamp(1, i32::MAX as i64) as i32
    }
}
