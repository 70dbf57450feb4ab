use macroquad::prelude::*;

/// Opacity lost per second.
const FADE_RATE: f32 = 0.9;
/// Upward drift in units per second.
const RISE_RATE: f32 = 28.0;

/// Short-lived "+1" marker shown where a coin was dropped off. Rises and
/// fades every tick; pruned once fully transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryNotice {
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
}

impl DeliveryNotice {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, alpha: 1.0 }
    }

    pub fn update(&mut self, dt: f32) {
        self.alpha -= FADE_RATE * dt;
        self.y -= RISE_RATE * dt;
    }

    pub fn is_active(&self) -> bool {
        self.alpha > 0.0
    }

    pub fn draw(&self) {
        if !self.is_active() {
            return;
        }
        let gold = Color::new(1.0, 0.843, 0.0, self.alpha);
        draw_circle(self.x - 10.0, self.y - 5.0, 4.0, gold);
        draw_text("+1", self.x, self.y, 18.0, gold);
    }
}
