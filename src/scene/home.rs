use anyhow::Result;
use macroquad::prelude::*;
use tracing::{info, warn};

use super::{Scene, SceneTransition, TownScene};
use crate::config::AppConfig;
use crate::upload::{
    decode_data_url, BackgroundTask, HistoryEntry, PixelifyClient, PixelifyResponse,
    SelectedImage, UploadController,
};
use crate::util::text;

const PREVIEW_BOX: (f32, f32, f32, f32) = (40.0, 120.0, 620.0, 440.0);
const RESULT_X: f32 = 720.0;
const RESULT_WRAP: usize = 62;

/// The upload view: pick an image, send it to the pixelify backend,
/// show the description (and generated image) that comes back.
pub struct HomeScene {
    config: AppConfig,
    client: PixelifyClient,
    controller: UploadController,
    submit: Option<BackgroundTask<PixelifyResponse>>,
    history_fetch: Option<BackgroundTask<Vec<HistoryEntry>>>,
    history: Vec<HistoryEntry>,
    preview: Option<Texture2D>,
    generated: Option<Texture2D>,
}

impl HomeScene {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = PixelifyClient::new(&config.backend_url)?;
        Ok(Self {
            config,
            client,
            controller: UploadController::new(),
            submit: None,
            history_fetch: None,
            history: Vec::new(),
            preview: None,
            generated: None,
        })
    }

    fn pick_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
            .pick_file()
        else {
            return;
        };

        match SelectedImage::from_path(&path) {
            Ok(selected) => {
                info!("selected {} ({} bytes)", path.display(), selected.bytes.len());
                self.preview = texture_for(&selected, 600.0, 420.0);
                self.generated = None;
                self.controller.select(selected);
            }
            Err(err) => {
                warn!("rejected {}: {err:#}", path.display());
                self.controller.reject(format!("{err:#}"));
            }
        }
    }

    fn submit(&mut self) {
        match self.controller.begin_submit() {
            Ok(payload) => {
                info!("submitting image to {}", self.config.backend_url);
                let client = self.client.clone();
                self.submit = Some(BackgroundTask::spawn(move || client.pixelify(&payload)));
            }
            Err(err) => self.controller.reject(err.to_string()),
        }
    }

    fn poll_tasks(&mut self) {
        if let Some(outcome) = self.submit.as_ref().and_then(|t| t.try_take()) {
            self.submit = None;
            if let Ok(response) = &outcome {
                info!("pixelify succeeded: {} chars", response.result_text.len());
                self.generated = decode_data_url(&response.generated_image)
                    .ok()
                    .and_then(|bytes| SelectedImage::from_bytes(bytes).ok())
                    .and_then(|img| texture_for(&img, 420.0, 320.0));
            } else if let Err(err) = &outcome {
                warn!("pixelify failed: {err:#}");
            }
            self.controller.finish(outcome);
        }

        if let Some(outcome) = self.history_fetch.as_ref().and_then(|t| t.try_take()) {
            self.history_fetch = None;
            match outcome {
                Ok(entries) => self.history = entries,
                Err(err) => warn!("history fetch failed: {err:#}"),
            }
        }
    }

    fn reset(&mut self) {
        self.controller.reset();
        self.preview = None;
        self.generated = None;
    }
}

impl Scene for HomeScene {
    fn update(&mut self) -> SceneTransition {
        self.poll_tasks();

        if is_key_pressed(KeyCode::O) {
            self.pick_file();
        }
        if is_key_pressed(KeyCode::Enter) {
            self.submit();
        }
        if is_key_pressed(KeyCode::R) {
            self.reset();
        }
        if is_key_pressed(KeyCode::L) && self.history_fetch.is_none() {
            let client = self.client.clone();
            self.history_fetch = Some(BackgroundTask::spawn(move || client.history()));
        }
        if is_key_pressed(KeyCode::T) {
            info!("switching to the town view");
            return SceneTransition::Replace(Box::new(TownScene::new(self.config.clone())));
        }
        if is_key_pressed(KeyCode::Escape) {
            return SceneTransition::Pop;
        }

        SceneTransition::None
    }

    fn draw(&self) {
        clear_background(Color::new(0.05, 0.05, 0.1, 1.0));

        draw_text("SANTA TRANSFORMER", 40.0, 60.0, 40.0, WHITE);
        draw_text(
            "Upload a character and see its Santa version",
            40.0,
            90.0,
            20.0,
            GRAY,
        );

        // Preview panel
        let (px, py, pw, ph) = PREVIEW_BOX;
        draw_rectangle_lines(px, py, pw, ph, 2.0, GRAY);
        if let Some(preview) = &self.preview {
            draw_texture(
                preview,
                px + (pw - preview.width()) / 2.0,
                py + (ph - preview.height()) / 2.0,
                WHITE,
            );
        } else {
            draw_text("[O] Choose an image...", px + 180.0, py + ph / 2.0, 24.0, GRAY);
        }

        // Result panel
        let mut y = 140.0;
        if self.controller.processing() {
            let dots = ".".repeat(1 + (get_time() * 2.0) as usize % 3);
            draw_text(
                &format!("Processing{dots}"),
                RESULT_X,
                y,
                28.0,
                YELLOW,
            );
        } else if let Some(result) = self.controller.result() {
            draw_text("SANTA VERSION", RESULT_X, y, 24.0, GREEN);
            y += 32.0;
            for line in text::wrap(&result.result_text, RESULT_WRAP) {
                draw_text(&line, RESULT_X, y, 20.0, WHITE);
                y += 24.0;
                if y > 540.0 {
                    break;
                }
            }
            if let Some(generated) = &self.generated {
                draw_texture(generated, RESULT_X, y + 10.0, WHITE);
            }
        } else {
            draw_text(
                "Pick an image and press [Enter] to pixelify it.",
                RESULT_X,
                y,
                20.0,
                GRAY,
            );
        }

        // Recent conversions
        if !self.history.is_empty() {
            draw_text("RECENT", 40.0, 620.0, 20.0, GRAY);
            let mut hy = 644.0;
            for entry in self.history.iter().take(5) {
                draw_text(&snippet(&entry.result_text, 90), 40.0, hy, 16.0, WHITE);
                hy += 20.0;
            }
        }

        // Error banner
        if let Some(error) = self.controller.error() {
            draw_rectangle(40.0, 700.0, 1520.0, 36.0, Color::new(0.4, 0.05, 0.05, 0.9));
            draw_text(error, 52.0, 724.0, 20.0, Color::new(1.0, 0.7, 0.7, 1.0));
        }

        draw_text(
            "[O] Open | [Enter] Pixelify | [R] Reset | [L] History | [T] Santa Town | [Esc] Quit",
            40.0,
            screen_height() - 20.0,
            16.0,
            GRAY,
        );
    }
}

fn texture_for(image: &SelectedImage, max_width: f32, max_height: f32) -> Option<Texture2D> {
    match image.preview_rgba(max_width as u32, max_height as u32) {
        Ok((w, h, rgba)) => Some(Texture2D::from_rgba8(w, h, &rgba)),
        Err(err) => {
            warn!("preview decode failed: {err:#}");
            None
        }
    }
}

fn snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
