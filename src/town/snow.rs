use macroquad::prelude::*;
use ::rand::Rng;

use super::{TOWN_HEIGHT, TOWN_WIDTH};

/// Falling speed range in units per second.
const MIN_SPEED: f32 = 18.0;
const MAX_SPEED: f32 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Snowflake {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub size: f32,
}

/// Ambient snowfall. Flakes fall forever: once one passes the bottom
/// edge it respawns at the top at a fresh horizontal position.
#[derive(Debug, Clone)]
pub struct Snowfield {
    flakes: Vec<Snowflake>,
}

impl Snowfield {
    pub fn new<R: Rng>(count: usize, rng: &mut R) -> Self {
        let flakes = (0..count)
            .map(|_| Snowflake {
                x: rng.gen_range(0.0..TOWN_WIDTH),
                y: rng.gen_range(0.0..TOWN_HEIGHT),
                speed: rng.gen_range(MIN_SPEED..MAX_SPEED),
                size: rng.gen_range(2.0..4.0),
            })
            .collect();
        Self { flakes }
    }

    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        for flake in &mut self.flakes {
            flake.y += flake.speed * dt;
            if flake.y > TOWN_HEIGHT {
                flake.y = 0.0;
                flake.x = rng.gen_range(0.0..TOWN_WIDTH);
            }
        }
    }

    pub fn draw(&self) {
        for flake in &self.flakes {
            draw_rectangle(flake.x, flake.y, flake.size, flake.size, WHITE);
        }
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }
}

#[cfg(test)]
mod tests {
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_flakes_wrap_to_top() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut field = Snowfield::new(50, &mut rng);

        // One tick's worth of fall is the most a flake may overshoot by.
        let dt = 1.0 / 60.0;
        for _ in 0..10_000 {
            field.update(dt, &mut rng);
            for flake in field.flakes() {
                assert!(flake.y <= TOWN_HEIGHT + MAX_SPEED * dt);
                assert!(flake.x >= 0.0 && flake.x <= TOWN_WIDTH);
            }
        }
    }

    #[test]
    fn test_flakes_keep_falling() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut field = Snowfield::new(10, &mut rng);
        let before: Vec<f32> = field.flakes().iter().map(|f| f.y).collect();

        field.update(0.5, &mut rng);

        for (flake, y0) in field.flakes().iter().zip(before) {
            // Either fell, or wrapped back to the top edge.
            assert!(flake.y > y0 || flake.y == 0.0);
        }
    }
}
