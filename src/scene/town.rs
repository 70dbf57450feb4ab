use macroquad::prelude::*;
use tracing::warn;

use super::{HomeScene, Scene, SceneTransition};
use crate::config::AppConfig;
use crate::town::TownState;

/// The animated town view. All simulation state lives in `TownState`
/// and is dropped wholesale when the scene is replaced, so nothing can
/// tick after the view is gone.
pub struct TownScene {
    config: AppConfig,
    town: TownState,
}

impl TownScene {
    pub fn new(config: AppConfig) -> Self {
        let town = TownState::new(config.santa_count, config.snowflake_count);
        Self { config, town }
    }
}

impl Scene for TownScene {
    fn update(&mut self) -> SceneTransition {
        if is_key_pressed(KeyCode::H) || is_key_pressed(KeyCode::Escape) {
            match HomeScene::new(self.config.clone()) {
                Ok(home) => return SceneTransition::Replace(Box::new(home)),
                Err(err) => warn!("could not return home: {err:#}"),
            }
        }

        self.town.update(get_frame_time());
        SceneTransition::None
    }

    fn draw(&self) {
        self.town.draw();
        draw_text(
            "[H] BACK HOME",
            screen_width() - 180.0,
            screen_height() - 20.0,
            16.0,
            GRAY,
        );
    }
}
