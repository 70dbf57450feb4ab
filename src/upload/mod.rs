mod client;
mod controller;
mod image;
mod task;

pub use client::{HistoryEntry, PixelifyClient, PixelifyResponse};
pub use controller::UploadController;
pub use image::{decode_data_url, SelectedImage};
pub use task::BackgroundTask;
