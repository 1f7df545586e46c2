use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use stagehand_core::{
    AppConfig, AudioElement, FontResource, HeadlessEngine, MusicResource, ResourceError, Scene,
    SceneDriver, SceneError, Vec2,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), SceneError> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            font,
            music,
            frames,
        } => run_demo(font, music, frames),
    }
}

fn run_demo(font: PathBuf, music: Option<PathBuf>, frames: u32) -> Result<(), SceneError> {
    tracing::info!(?font, ?music, frames, "starting headless demo");

    let engine = Arc::new(HeadlessEngine::new());
    let scene = DemoScene::new(engine, AppConfig::default(), font, music);
    let mut driver = SceneDriver::new(scene);

    driver.init()?;
    for _ in 0..frames {
        driver.update(1.0 / 60.0)?;
        driver.draw()?;
    }
    driver.destroy()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Minimal scene exercising the resource lifecycle end to end: acquire in
/// `init`, control in `update`, draw in `draw`, release in `destroy`.
struct DemoScene {
    engine: Arc<HeadlessEngine>,
    config: AppConfig,
    font_path: PathBuf,
    music_path: Option<PathBuf>,
    font: Option<FontResource<HeadlessEngine>>,
    music: Option<MusicResource<HeadlessEngine>>,
    elapsed: f32,
}

impl DemoScene {
    fn new(
        engine: Arc<HeadlessEngine>,
        config: AppConfig,
        font_path: PathBuf,
        music_path: Option<PathBuf>,
    ) -> Self {
        Self {
            engine,
            config,
            font_path,
            music_path,
            font: None,
            music: None,
            elapsed: 0.0,
        }
    }
}

impl Scene for DemoScene {
    fn init(&mut self) -> Result<(), ResourceError> {
        let font =
            FontResource::from_file_with(self.engine.clone(), &self.font_path, self.config.font)?;
        self.font = Some(font);

        if let Some(path) = &self.music_path {
            let mut music =
                MusicResource::from_file_with(self.engine.clone(), path, self.config.audio)?;
            music.play()?;
            self.music = Some(music);
        }
        Ok(())
    }

    fn update(&mut self, delta_seconds: f32) -> Result<(), ResourceError> {
        self.elapsed += delta_seconds;
        if let Some(music) = &mut self.music {
            if !music.pump()? {
                tracing::warn!(path = music.path(), "music stream starved");
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<(), ResourceError> {
        if let Some(font) = &self.font {
            let caption = format!("elapsed {:.2}s", self.elapsed);
            font.draw(&caption, Vec2::new(16.0, 16.0), None, None, None)?;
        }
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), ResourceError> {
        if let Some(music) = &mut self.music {
            music.stop()?;
            music.dispose();
        }
        if let Some(font) = &mut self.font {
            font.dispose();
        }
        self.music = None;
        self.font = None;
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Stagehand resource-lifecycle demo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive a demo scene through the headless engine for a fixed number of
    /// frames.
    Demo {
        /// Path to the font asset the scene draws with.
        font: PathBuf,
        /// Optional path to a music track streamed during the demo.
        #[arg(short, long)]
        music: Option<PathBuf>,
        /// How many update/draw frames to run.
        #[arg(short, long, default_value_t = 60)]
        frames: u32,
    },
}
