use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::{Rng, SeedableRng};

use super::{
    actor::{Behavior, DELIVERY_RADIUS, RESTOCK_DELAY},
    Actor, Building, DeliveryNotice, Snowfield, TOWN_HEIGHT, TOWN_WIDTH,
};

/// Share of santas that deliver coins; the rest just roam.
const COURIER_RATIO: f64 = 0.75;

/// The whole town: buildings, santas, snowfall and delivery notices,
/// advanced one tick at a time. Every field dies with the owning scene,
/// so no update can outlive the view.
pub struct TownState {
    buildings: Vec<Building>,
    actors: Vec<Actor>,
    snow: Snowfield,
    notices: Vec<DeliveryNotice>,
    rng: StdRng,
}

impl TownState {
    pub fn new(santa_count: usize, snowflake_count: usize) -> Self {
        Self::with_rng(santa_count, snowflake_count, StdRng::from_entropy())
    }

    /// Deterministic construction for tests.
    pub fn new_seeded(santa_count: usize, snowflake_count: usize, seed: u64) -> Self {
        Self::with_rng(santa_count, snowflake_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(santa_count: usize, snowflake_count: usize, mut rng: StdRng) -> Self {
        let actors = (0..santa_count)
            .map(|_| {
                let courier = rng.gen_bool(COURIER_RATIO);
                Actor::spawn(&mut rng, courier)
            })
            .collect();
        let snow = Snowfield::new(snowflake_count, &mut rng);

        Self {
            buildings: super::town_layout(),
            actors,
            snow,
            notices: Vec::new(),
            rng,
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn notices(&self) -> &[DeliveryNotice] {
        &self.notices
    }

    pub fn santa_count(&self) -> usize {
        self.actors.len()
    }

    pub fn total_deliveries(&self) -> u32 {
        self.buildings.iter().map(|b| b.deliveries).sum()
    }

    /// Advance the simulation by `dt` seconds: snow, then actors (with
    /// delivery bookkeeping), then notice decay.
    pub fn update(&mut self, dt: f32) {
        self.snow.update(dt, &mut self.rng);

        for actor in &mut self.actors {
            match actor.behavior {
                Behavior::Wanderer => actor.wander(dt, &mut self.rng),
                Behavior::Courier(mut courier) => {
                    if courier.carrying {
                        if courier.target.is_none() {
                            courier.target = actor.nearest_building(&self.buildings);
                        }
                        if let Some(idx) = courier.target {
                            let (gx, gy) = self.buildings[idx].center();
                            actor.steer_towards(gx, gy);
                            if actor.within(gx, gy, DELIVERY_RADIUS) {
                                let building = &mut self.buildings[idx];
                                building.deliveries += 1;
                                self.notices.push(DeliveryNotice::new(gx, building.y - 10.0));
                                courier.carrying = false;
                                courier.target = None;
                                courier.restock = RESTOCK_DELAY;
                            }
                        } else {
                            actor.wander(dt, &mut self.rng);
                        }
                    } else {
                        actor.wander(dt, &mut self.rng);
                        courier.restock -= dt;
                        if courier.restock <= 0.0 {
                            courier.restock = 0.0;
                            courier.carrying = true;
                        }
                    }
                    actor.behavior = Behavior::Courier(courier);
                }
            }
            actor.integrate(dt);
        }

        for notice in &mut self.notices {
            notice.update(dt);
        }
        self.notices.retain(|n| n.is_active());
    }

    pub fn draw(&self) {
        self.draw_background();

        for building in &self.buildings {
            building.draw();
        }
        self.snow.draw();
        for actor in &self.actors {
            actor.draw();
        }
        for notice in &self.notices {
            notice.draw();
        }

        self.draw_overlay();
    }

    /// Static backdrop: sky gradient, stars, moon, snowy ground. Depends
    /// on nothing but the canvas size.
    fn draw_background(&self) {
        let bands = 16;
        let band_h = TOWN_HEIGHT / bands as f32;
        for i in 0..bands {
            let t = i as f32 / (bands - 1) as f32;
            let color = Color::new(
                0.102 + (0.086 - 0.102) * t,
                0.102 + (0.129 - 0.102) * t,
                0.180 + (0.243 - 0.180) * t,
                1.0,
            );
            draw_rectangle(0.0, i as f32 * band_h, TOWN_WIDTH, band_h + 1.0, color);
        }

        for i in 0..30u32 {
            let x = (i * 123) % TOWN_WIDTH as u32;
            let y = (i * 234) % (TOWN_HEIGHT as u32 / 2);
            draw_rectangle(x as f32, y as f32, 2.0, 2.0, WHITE);
        }

        draw_circle(1400.0, 100.0, 40.0, Color::new(0.941, 0.941, 0.941, 1.0));

        draw_rectangle(
            0.0,
            TOWN_HEIGHT - 80.0,
            TOWN_WIDTH,
            80.0,
            Color::new(0.910, 0.961, 0.914, 1.0),
        );
        let mut x = 0.0;
        while x < TOWN_WIDTH {
            draw_rectangle(x, TOWN_HEIGHT - 85.0, 15.0, 5.0, WHITE);
            x += 20.0;
        }
    }

    fn draw_overlay(&self) {
        draw_rectangle(10.0, 10.0, 320.0, 70.0, Color::new(0.0, 0.0, 0.0, 0.6));
        draw_text("SANTA TOWN", 20.0, 34.0, 24.0, WHITE);
        draw_text(
            &format!("{} santas working", self.santa_count()),
            20.0,
            54.0,
            16.0,
            WHITE,
        );
        draw_text(
            &format!("{} coins delivered", self.total_deliveries()),
            20.0,
            72.0,
            16.0,
            Color::new(1.0, 0.843, 0.0, 1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::actor::CourierState;
    use super::*;

    fn tick(town: &mut TownState, n: usize) {
        for _ in 0..n {
            town.update(1.0 / 60.0);
        }
    }

    #[test]
    fn test_actors_stay_in_bounds() {
        let mut town = TownState::new_seeded(20, 50, 1234);
        tick(&mut town, 20_000);
        for actor in town.actors() {
            assert!(actor.x >= 0.0 && actor.x <= TOWN_WIDTH - actor.width);
            assert!(actor.y >= 0.0 && actor.y <= TOWN_HEIGHT - actor.height);
        }
    }

    #[test]
    fn test_deliveries_accumulate() {
        let mut town = TownState::new_seeded(20, 10, 7);
        tick(&mut town, 60 * 120);
        // Two simulated minutes with 20 santas is plenty for a delivery.
        assert!(town.total_deliveries() > 0);
    }

    #[test]
    fn test_delivery_increments_counter_once_and_drops_coin() {
        let mut town = TownState::new_seeded(1, 0, 99);

        // Force a single courier right next to building 0's center.
        let (gx, gy) = town.buildings[0].center();
        let actor = &mut town.actors[0];
        actor.behavior = Behavior::Courier(CourierState {
            carrying: true,
            target: Some(0),
            restock: 0.0,
        });
        actor.x = gx - actor.width / 2.0 + 2.0;
        actor.y = gy - actor.height / 2.0;

        town.update(1.0 / 60.0);

        assert_eq!(town.buildings()[0].deliveries, 1);
        assert_eq!(town.notices().len(), 1);
        let actor = &town.actors()[0];
        assert!(!actor.carrying());
        match actor.behavior {
            Behavior::Courier(c) => {
                assert_eq!(c.target, None);
                assert!(c.restock > 0.0);
            }
            Behavior::Wanderer => panic!("courier must stay a courier"),
        }
    }

    #[test]
    fn test_coin_reacquired_after_restock_delay() {
        let mut town = TownState::new_seeded(1, 0, 5);
        town.actors[0].behavior = Behavior::Courier(CourierState {
            carrying: false,
            target: None,
            restock: RESTOCK_DELAY,
        });

        tick(&mut town, 60 * 4);

        assert!(town.actors()[0].carrying());
    }

    #[test]
    fn test_notices_pruned_after_fading() {
        let mut town = TownState::new_seeded(1, 0, 99);
        let (gx, gy) = town.buildings[0].center();
        let actor = &mut town.actors[0];
        actor.behavior = Behavior::Courier(CourierState {
            carrying: true,
            target: Some(0),
            restock: 0.0,
        });
        actor.x = gx - actor.width / 2.0;
        actor.y = gy - actor.height / 2.0;

        town.update(1.0 / 60.0);
        assert_eq!(town.notices().len(), 1);

        tick(&mut town, 60 * 30);
        assert!(town.notices().is_empty());
    }

    #[test]
    fn test_courier_heads_for_nearest_building() {
        let mut town = TownState::new_seeded(1, 0, 11);
        let actor = &mut town.actors[0];
        actor.behavior = Behavior::Courier(CourierState {
            carrying: true,
            target: None,
            restock: 0.0,
        });
        actor.x = 50.0;
        actor.y = 50.0;

        town.update(1.0 / 60.0);

        match town.actors()[0].behavior {
            Behavior::Courier(c) => assert_eq!(c.target, Some(0)),
            Behavior::Wanderer => panic!("expected a courier"),
        }
    }
}
