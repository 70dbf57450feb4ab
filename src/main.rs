use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use macroquad::prelude::*;
use tracing::{error, info};

use santa_town::config::AppConfig;
use santa_town::scene::{HomeScene, Scene, SceneTransition};
use santa_town::util::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "santa-town", version, about = "Pixel Santa Town client")]
struct Args {
    /// Path to the config file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Backend base URL (overrides the config file)
    #[arg(long, env = "SANTA_BACKEND_URL")]
    backend_url: Option<String>,

    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

struct Boot {
    config: AppConfig,
    log_dir: Option<PathBuf>,
}

static BOOT: OnceLock<Boot> = OnceLock::new();

// Called from window_conf before macroquad starts, so the window can be
// sized from the config file.
fn boot() -> &'static Boot {
    BOOT.get_or_init(|| {
        let args = Args::parse();
        let mut config = match AppConfig::load_from(&args.config) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("could not read {}: {err:#}", args.config.display());
                AppConfig::default()
            }
        };
        if let Some(url) = args.backend_url {
            config.backend_url = url;
        }
        if args.verbose {
            config.verbose_logs = true;
        }
        Boot {
            config,
            log_dir: args.log_dir,
        }
    })
}

fn window_conf() -> Conf {
    let boot = boot();
    Conf {
        window_title: "Santa Town".to_owned(),
        window_width: boot.config.window_width as i32,
        window_height: boot.config.window_height as i32,
        fullscreen: boot.config.fullscreen,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let boot = boot();
    if let Err(err) = init_logging(boot.log_dir.as_deref(), boot.config.verbose_logs) {
        eprintln!("failed to initialize logging: {err:#}");
    }
    info!("starting, backend at {}", boot.config.backend_url);

    let home = match HomeScene::new(boot.config.clone()) {
        Ok(home) => home,
        Err(err) => {
            error!("startup failed: {err:#}");
            return;
        }
    };

    let mut scenes: Vec<Box<dyn Scene>> = vec![Box::new(home)];
    loop {
        let Some(current) = scenes.last_mut() else {
            break;
        };
        match current.update() {
            SceneTransition::None => {}
            SceneTransition::Push(next) => scenes.push(next),
            SceneTransition::Pop => {
                scenes.pop();
            }
            SceneTransition::Replace(next) => {
                scenes.pop();
                scenes.push(next);
            }
        }

        let Some(top) = scenes.last() else {
            break;
        };
        top.draw();
        next_frame().await;
    }

    info!("shutting down");
}
