//! Canvas painting for one frame: the car sprite at the ground line, every
//! live obstacle, then the score line.

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::game::{CAR_HEIGHT, CAR_WIDTH, GameState};

/// Thin wrapper over the 2d context exposing the three operations the game
/// needs. Fallible draw calls are ignored with `.ok()`; a failed blit just
/// skips one frame's worth of pixels.
pub struct Surface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Surface {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        ctx.set_font("24px Arial");
        Self { ctx, width, height }
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    pub fn draw_sprite(&self, image: &HtmlImageElement, x: f64, y: f64, w: f64, h: f64) {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h)
            .ok();
    }

    pub fn draw_text(&self, text: &str, x: f64, y: f64) {
        self.ctx.set_fill_style_str("#fff");
        self.ctx.fill_text(text, x, y).ok();
    }
}

pub fn draw_frame(
    surface: &Surface,
    state: &GameState,
    car: &HtmlImageElement,
    obstacle: &HtmlImageElement,
) {
    surface.clear();
    surface.draw_sprite(car, state.car_x, state.ground_y(), CAR_WIDTH, CAR_HEIGHT);
    for ob in state.field.obstacles() {
        surface.draw_sprite(obstacle, ob.x, ob.y, ob.width, ob.height);
    }
    surface.draw_text(&format!("Score: {}", state.score), 10.0, 30.0);
}
