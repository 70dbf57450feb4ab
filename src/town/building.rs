use macroquad::prelude::*;

/// A stationary town building. Couriers deliver coins to these; the
/// counter only ever grows while the scene is alive.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Palette selector (alternating wall/roof colors).
    pub kind: usize,
    pub deliveries: u32,
}

impl Building {
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
            deliveries: 0,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    fn wall_color(&self) -> Color {
        if self.kind % 2 == 0 {
            Color::new(0.545, 0.271, 0.075, 1.0)
        } else {
            Color::new(0.627, 0.322, 0.176, 1.0)
        }
    }

    fn roof_color(&self) -> Color {
        if self.kind % 2 == 0 {
            Color::new(0.753, 0.141, 0.145, 1.0)
        } else {
            Color::new(0.627, 0.122, 0.125, 1.0)
        }
    }

    pub fn draw(&self) {
        // Walls
        draw_rectangle(self.x, self.y, self.width, self.height, self.wall_color());

        // Roof
        draw_triangle(
            vec2(self.x - 10.0, self.y),
            vec2(self.x + self.width / 2.0, self.y - 30.0),
            vec2(self.x + self.width + 10.0, self.y),
            self.roof_color(),
        );

        // Windows, lit in a fixed pattern so they don't flicker
        let frame = Color::new(0.0, 0.0, 0.0, 1.0);
        let lit = Color::new(1.0, 0.843, 0.0, 1.0);
        let dark = Color::new(0.396, 0.263, 0.129, 1.0);
        let mut row = 0;
        while self.y + 20.0 + row as f32 * 35.0 + 24.0 < self.y + self.height - 20.0 {
            let mut col = 0;
            while self.x + 15.0 + col as f32 * 25.0 + 18.0 < self.x + self.width - 10.0 {
                let wx = self.x + 15.0 + col as f32 * 25.0;
                let wy = self.y + 20.0 + row as f32 * 35.0;
                let glow = (row * 31 + col * 17 + self.kind * 7) % 10 >= 3;
                draw_rectangle(wx, wy, 18.0, 24.0, if glow { lit } else { dark });
                draw_rectangle_lines(wx, wy, 18.0, 24.0, 2.0, frame);
                col += 1;
            }
            row += 1;
        }

        // Door
        let door_x = self.x + self.width / 2.0 - 15.0;
        let door_y = self.y + self.height - 35.0;
        draw_rectangle(door_x, door_y, 30.0, 35.0, dark);
        draw_rectangle_lines(door_x, door_y, 30.0, 35.0, 2.0, frame);

        // Delivery tally above the roof
        if self.deliveries > 0 {
            let label = format!("{} coins", self.deliveries);
            draw_text(
                &label,
                self.x + self.width / 2.0 - 24.0,
                self.y - 36.0,
                16.0,
                Color::new(1.0, 0.843, 0.0, 1.0),
            );
        }
    }
}

/// The fixed town layout: ten houses spread over the 1600x800 canvas.
pub fn town_layout() -> Vec<Building> {
    vec![
        Building::new(100.0, 150.0, 150.0, 120.0, 0),
        Building::new(300.0, 100.0, 120.0, 140.0, 1),
        Building::new(480.0, 300.0, 160.0, 130.0, 2),
        Building::new(700.0, 150.0, 130.0, 110.0, 3),
        Building::new(900.0, 250.0, 140.0, 140.0, 4),
        Building::new(1100.0, 100.0, 135.0, 125.0, 5),
        Building::new(1300.0, 300.0, 150.0, 140.0, 6),
        Building::new(200.0, 500.0, 110.0, 100.0, 7),
        Building::new(800.0, 550.0, 130.0, 120.0, 8),
        Building::new(1200.0, 520.0, 140.0, 110.0, 9),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_has_ten_buildings() {
        let buildings = town_layout();
        assert_eq!(buildings.len(), 10);
        for b in &buildings {
            assert_eq!(b.deliveries, 0);
            assert!(b.width > 0.0 && b.height > 0.0);
        }
    }

    #[test]
    fn test_center() {
        let b = Building::new(100.0, 150.0, 150.0, 120.0, 0);
        assert_eq!(b.center(), (175.0, 210.0));
    }
}
