//! Read-only drawing of a [`GameLoop`] onto any cell-painting surface.

use crate::game::{CellRng, GameLoop, Segment};

/// Something that can paint square cells: the browser canvas, or a recorder in tests.
pub trait RenderSink {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_cell(&mut self, at: Segment, size: f64, color: &str);
}

/// Paint one frame: fruit first, then the body with colours alternating by
/// segment parity (even indices, head included, use the alternate colour).
/// Runs every animation frame whether or not the game is still alive.
pub fn draw_frame<R: CellRng, S: RenderSink>(game: &GameLoop<R>, sink: &mut S) {
    let cfg = game.config();
    let size = cfg.cell as f64;
    sink.clear(cfg.width as f64, cfg.height as f64);
    sink.fill_cell(game.fruit(), size, &cfg.fruit_color);
    for (idx, seg) in game.snake().body().iter().enumerate() {
        let color = if idx % 2 == 0 {
            &cfg.body_alt_color
        } else {
            &cfg.body_color
        };
        sink.fill_cell(*seg, size, color);
    }
}
