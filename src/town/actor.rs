use macroquad::prelude::*;
use ::rand::seq::SliceRandom;
use ::rand::Rng;

use super::{Building, TOWN_HEIGHT, TOWN_WIDTH};

/// Hard cap on wandering speed, units per second.
pub const MAX_WANDER_SPEED: f32 = 120.0;
/// Velocity jitter applied while wandering, units per second squared.
const WANDER_JITTER: f32 = 240.0;
/// Fixed speed while heading to a building with a coin.
pub const COURIER_SPEED: f32 = 72.0;
/// Within this distance of a building's center the coin counts as
/// delivered.
pub const DELIVERY_RADIUS: f32 = 14.0;
/// Seconds before a courier picks up the next coin.
pub const RESTOCK_DELAY: f32 = 3.0;

const NAME_POOL: [&str; 20] = [
    "Klaus", "Jingle", "Frosty", "Rudolph", "Snowman", "Blitzen", "Dasher", "Comet", "Cupid",
    "Prancer", "Vixen", "Donner", "Nick", "Kris", "Jolly", "Merry", "Cheer", "Holly", "Ivy",
    "Noel",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourierState {
    pub carrying: bool,
    /// Index into the town's building list.
    pub target: Option<usize>,
    /// Countdown until the next coin is picked up.
    pub restock: f32,
}

/// Movement mode. Wanderers just roam; couriers alternate between
/// roaming (no coin) and heading straight for the nearest building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    Wanderer,
    Courier(CourierState),
}

/// A pixel santa roaming the town.
#[derive(Debug, Clone)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub name: &'static str,
    pub show_name: bool,
    pub behavior: Behavior,
}

impl Actor {
    pub fn spawn<R: Rng>(rng: &mut R, courier: bool) -> Self {
        let width = 16.0;
        let speed = rng.gen_range(30.0..120.0);
        let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let behavior = if courier {
            Behavior::Courier(CourierState {
                carrying: true,
                target: None,
                restock: 0.0,
            })
        } else {
            Behavior::Wanderer
        };

        Self {
            x: rng.gen_range(0.0..TOWN_WIDTH - width),
            y: TOWN_HEIGHT - 100.0,
            vx: speed * direction,
            vy: 0.0,
            width,
            height: 20.0,
            name: NAME_POOL.choose(rng).copied().unwrap_or("Klaus"),
            show_name: rng.gen_bool(0.3),
            behavior,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Straight-line nearest building; the first one at the minimal
    /// distance wins.
    pub fn nearest_building(&self, buildings: &[Building]) -> Option<usize> {
        let (ax, ay) = self.center();
        let mut best: Option<(usize, f32)> = None;
        for (idx, building) in buildings.iter().enumerate() {
            let (bx, by) = building.center();
            let dist = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((idx, dist));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Point the velocity straight at `(gx, gy)` at the courier speed.
    pub fn steer_towards(&mut self, gx: f32, gy: f32) {
        let (ax, ay) = self.center();
        let dx = gx - ax;
        let dy = gy - ay;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > f32::EPSILON {
            self.vx = dx / dist * COURIER_SPEED;
            self.vy = dy / dist * COURIER_SPEED;
        }
    }

    pub fn within(&self, gx: f32, gy: f32, radius: f32) -> bool {
        let (ax, ay) = self.center();
        let dx = gx - ax;
        let dy = gy - ay;
        dx * dx + dy * dy <= radius * radius
    }

    /// Nudge the velocity randomly, capped at the wander speed limit.
    pub fn wander<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        self.vx += rng.gen_range(-WANDER_JITTER..WANDER_JITTER) * dt;
        self.vy += rng.gen_range(-WANDER_JITTER..WANDER_JITTER) * dt;
        let speed = (self.vx * self.vx + self.vy * self.vy).sqrt();
        if speed > MAX_WANDER_SPEED {
            let scale = MAX_WANDER_SPEED / speed;
            self.vx *= scale;
            self.vy *= scale;
        }
    }

    /// Apply velocity, reflecting off the canvas edges and clamping the
    /// position so the sprite never leaves the town.
    pub fn integrate(&mut self, dt: f32) {
        self.x += self.vx * dt;
        self.y += self.vy * dt;

        if self.x < 0.0 {
            self.x = 0.0;
            self.vx = self.vx.abs();
        } else if self.x > TOWN_WIDTH - self.width {
            self.x = TOWN_WIDTH - self.width;
            self.vx = -self.vx.abs();
        }

        if self.y < 0.0 {
            self.y = 0.0;
            self.vy = self.vy.abs();
        } else if self.y > TOWN_HEIGHT - self.height {
            self.y = TOWN_HEIGHT - self.height;
            self.vy = -self.vy.abs();
        }
    }

    pub fn carrying(&self) -> bool {
        matches!(
            self.behavior,
            Behavior::Courier(CourierState { carrying: true, .. })
        )
    }

    pub fn draw(&self) {
        let red = Color::new(0.753, 0.141, 0.145, 1.0);
        let skin = Color::new(1.0, 0.859, 0.675, 1.0);
        let gold = Color::new(1.0, 0.843, 0.0, 1.0);

        // Hat and pom
        draw_rectangle(self.x + 3.0, self.y, 10.0, 6.0, red);
        draw_rectangle(self.x + 6.0, self.y - 2.0, 4.0, 4.0, WHITE);
        // Face
        draw_rectangle(self.x + 4.0, self.y + 6.0, 8.0, 6.0, skin);
        // Beard
        draw_rectangle(self.x + 3.0, self.y + 10.0, 10.0, 4.0, WHITE);
        // Body and arms
        draw_rectangle(self.x + 2.0, self.y + 14.0, 12.0, 6.0, red);
        draw_rectangle(self.x, self.y + 15.0, 2.0, 3.0, red);
        draw_rectangle(self.x + 14.0, self.y + 15.0, 2.0, 3.0, red);
        // Belt and buckle
        draw_rectangle(self.x + 2.0, self.y + 18.0, 12.0, 1.0, BLACK);
        draw_rectangle(self.x + 6.0, self.y + 17.0, 4.0, 2.0, gold);

        if self.carrying() {
            draw_circle(self.x + self.width / 2.0, self.y - 8.0, 3.0, gold);
        }

        if self.show_name {
            draw_rectangle(
                self.x - 10.0,
                self.y - 27.0,
                36.0,
                12.0,
                Color::new(0.0, 0.0, 0.0, 0.7),
            );
            draw_text(self.name, self.x - 8.0, self.y - 18.0, 10.0, WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::super::town_layout;
    use super::*;

    #[test]
    fn test_spawn_inside_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for courier in [false, true] {
            let actor = Actor::spawn(&mut rng, courier);
            assert!(actor.x >= 0.0 && actor.x <= TOWN_WIDTH - actor.width);
            assert!(actor.y >= 0.0 && actor.y <= TOWN_HEIGHT - actor.height);
            assert_eq!(courier, matches!(actor.behavior, Behavior::Courier(_)));
        }
    }

    #[test]
    fn test_wander_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut actor = Actor::spawn(&mut rng, false);
        let dt = 1.0 / 60.0;
        for _ in 0..50_000 {
            actor.wander(dt, &mut rng);
            actor.integrate(dt);
            assert!(actor.x >= 0.0 && actor.x <= TOWN_WIDTH - actor.width);
            assert!(actor.y >= 0.0 && actor.y <= TOWN_HEIGHT - actor.height);
        }
    }

    #[test]
    fn test_reflects_off_right_edge() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut actor = Actor::spawn(&mut rng, false);
        actor.x = TOWN_WIDTH - actor.width - 0.5;
        actor.vx = 100.0;
        actor.vy = 0.0;
        actor.integrate(0.1);
        assert_eq!(actor.x, TOWN_WIDTH - actor.width);
        assert!(actor.vx < 0.0);
    }

    #[test]
    fn test_wander_speed_is_capped() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut actor = Actor::spawn(&mut rng, false);
        for _ in 0..10_000 {
            actor.wander(1.0 / 60.0, &mut rng);
            let speed = (actor.vx * actor.vx + actor.vy * actor.vy).sqrt();
            assert!(speed <= MAX_WANDER_SPEED + 1e-3);
        }
    }

    #[test]
    fn test_nearest_building_first_minimal_wins() {
        let buildings = town_layout();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut actor = Actor::spawn(&mut rng, true);

        // Equidistant from buildings 0 and 1: midpoint of their centers.
        let (c0x, c0y) = buildings[0].center();
        let (c1x, c1y) = buildings[1].center();
        actor.x = (c0x + c1x) / 2.0 - actor.width / 2.0;
        actor.y = (c0y + c1y) / 2.0 - actor.height / 2.0;

        assert_eq!(actor.nearest_building(&buildings), Some(0));
    }

    #[test]
    fn test_steering_points_at_goal() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut actor = Actor::spawn(&mut rng, true);
        actor.x = 100.0;
        actor.y = 100.0;
        actor.steer_towards(500.0, 110.0);
        assert!(actor.vx > 0.0);
        let speed = (actor.vx * actor.vx + actor.vy * actor.vy).sqrt();
        assert!((speed - COURIER_SPEED).abs() < 1e-3);
    }
}
