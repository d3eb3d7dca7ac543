use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod animator;
mod config;
mod constants;
mod controller;
mod error;
mod hero;
mod input;
mod render;
mod scene;
mod slide;
mod stage;
mod state;
mod texture_loader;
mod timeline;
mod transition;

use crate::config::HeroConfig;
use crate::constants::*;
use crate::hero::Hero;
use crate::input::{poll_events, InputBus};
use crate::render::TextMetrics;
use crate::texture_loader::Assets;

#[derive(Parser)]
#[command(name = "hero-carousel")]
#[command(version, about = "Full-screen hero carousel driven by scroll, swipe and keyboard")]
struct Cli {
    /// TOML configuration file (defaults are built in)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial window width
    #[arg(long)]
    width: Option<i32>,

    /// Initial window height
    #[arg(long)]
    height: Option<i32>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Skip image loading and show background colors only
    #[arg(long)]
    offline: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // --- Configuration: file first, then command line overrides ---
    let mut config = match &cli.config {
        Some(path) => HeroConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => HeroConfig::default(),
    };
    if let Some(width) = cli.width {
        config.window.width = width;
    }
    if let Some(height) = cli.height {
        config.window.height = height;
    }
    if let Some(fps) = cli.fps {
        config.window.fps = fps;
    }
    config.validate().context("Invalid configuration")?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let deck = config.deck()?;

    let (mut rl, thread) = raylib::init()
        .size(config.window.width, config.window.height)
        .title(&config.window.title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(config.window.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Images ---
    let assets = if cli.offline {
        info!("offline mode, images skipped");
        Assets::empty(&deck)
    } else {
        Assets::load(&mut rl, &thread, &deck)
    };

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow::anyhow!("Failed to create render texture: {}", e))?;

    let metrics = TextMetrics::measure(&rl, &deck);

    let bus = InputBus::new();
    let mut hero = Hero::mount(deck.len(), &config.animation, &bus)?;
    let mut announced = None;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        for event in poll_events(&mut rl) {
            hero.dispatch(&event);
        }
        hero.update(dt);

        // Screen readers pick up the window title
        let accessible = hero.scene().accessible_slide();
        if accessible != announced {
            if let Some(text) = accessible.and_then(|i| deck.announcement(i)) {
                rl.set_window_title(&thread, &format!("{} - {}", config.window.title, text));
            }
            announced = accessible;
        }

        let mut d = rl.begin_drawing(&thread);
        {
            let mut target = d.begin_texture_mode(&thread, &mut framebuffer);
            render::draw_scene(&mut target, hero.scene(), &deck, &assets, &metrics);
        }

        // Letterbox the fixed-size framebuffer into the window
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        let scale = (sw / RENDER_WIDTH as f32).min(sh / RENDER_HEIGHT as f32);
        let (w, h) = (RENDER_WIDTH as f32 * scale, RENDER_HEIGHT as f32 * scale);

        d.clear_background(Color::BLACK);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new((sw - w) * 0.5, (sh - h) * 0.5, w, h),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    hero.unmount();
    Ok(())
}
