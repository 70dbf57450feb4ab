pub mod config;
pub mod scene;
pub mod town;
pub mod upload;
pub mod util;
