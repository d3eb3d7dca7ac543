use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::constants::*;
use crate::error::{HeroError, Result};
use crate::slide::{parse_color, Deck, OverlayImage, Slide, SlideKind, DEFAULT_OVERLAY_IMAGES, DEFAULT_SLIDES};
use crate::transition::Timing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroConfig {
    // Plain values first, TOML emits them ahead of the tables
    #[serde(default = "default_overlay_images")]
    pub overlay_images: Vec<String>,
    #[serde(default = "default_footer")]
    pub footer: String,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default = "default_slides")]
    pub slides: Vec<SlideConfig>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            overlay_images: default_overlay_images(),
            footer: default_footer(),
            window: WindowConfig::default(),
            animation: AnimationConfig::default(),
            slides: default_slides(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Initial window width in pixels
    #[serde(default = "default_window_width")]
    pub width: i32,
    /// Initial window height in pixels
    #[serde(default = "default_window_height")]
    pub height: i32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            fps: default_fps(),
            title: default_title(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Timeline length of a transition, before time scaling
    #[serde(default = "default_duration")]
    pub duration: f32,
    /// Playback speed of every transition
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
    /// Timeline offset at which the counter changes
    #[serde(default = "default_counter_at")]
    pub counter_at: f32,
    /// Gesture dead-zone in pixels
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    /// Wheel delta multiplier
    #[serde(default = "default_wheel_speed")]
    pub wheel_speed: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            time_scale: default_time_scale(),
            counter_at: default_counter_at(),
            tolerance: default_tolerance(),
            wheel_speed: default_wheel_speed(),
        }
    }
}

impl AnimationConfig {
    pub fn timing(&self) -> Timing {
        Timing {
            duration: self.duration,
            time_scale: self.time_scale,
            counter_at: self.counter_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideConfig {
    pub kind: SlideKind,
    /// Image URL or local path
    pub image: String,
    /// Background color as "#rrggbb"
    pub background: String,
}

fn default_slides() -> Vec<SlideConfig> {
    DEFAULT_SLIDES
        .iter()
        .map(|(kind, image, background)| SlideConfig {
            kind: *kind,
            image: image.to_string(),
            background: background.to_string(),
        })
        .collect()
}

fn default_overlay_images() -> Vec<String> {
    DEFAULT_OVERLAY_IMAGES.iter().map(|s| s.to_string()).collect()
}

fn default_footer() -> String {
    FOOTER_CAPTION.to_string()
}

fn default_window_width() -> i32 {
    RENDER_WIDTH / 2
}

fn default_window_height() -> i32 {
    RENDER_HEIGHT / 2
}

fn default_fps() -> u32 {
    FPS
}

fn default_title() -> String {
    "Hero Carousel".to_string()
}

fn default_duration() -> f32 {
    TRANSITION_DURATION
}

fn default_time_scale() -> f32 {
    TIME_SCALE
}

fn default_counter_at() -> f32 {
    COUNTER_CUE_AT
}

fn default_tolerance() -> f32 {
    GESTURE_TOLERANCE
}

fn default_wheel_speed() -> f32 {
    WHEEL_SPEED
}

impl HeroConfig {
    /// Reads and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!(path = %path.display(), slides = config.slides.len(), "configuration loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: HeroConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.slides.is_empty() {
            return Err(HeroError::InvalidConfig("at least one slide is required".into()));
        }
        if self.overlay_images.len() != self.slides.len() {
            return Err(HeroError::InvalidConfig(format!(
                "{} overlay images for {} slides, counts must match",
                self.overlay_images.len(),
                self.slides.len()
            )));
        }
        if !(self.animation.duration > 0.0) || !(self.animation.time_scale > 0.0) {
            return Err(HeroError::InvalidConfig(
                "animation duration and time_scale must be positive".into(),
            ));
        }
        if !(self.animation.counter_at >= 0.0 && self.animation.counter_at <= self.animation.duration) {
            return Err(HeroError::InvalidConfig(
                "counter_at must lie between 0 and the animation duration".into(),
            ));
        }
        if !(self.animation.tolerance >= 0.0) {
            return Err(HeroError::InvalidConfig("gesture tolerance must not be negative".into()));
        }
        if self.window.width <= 0 || self.window.height <= 0 || self.window.fps == 0 {
            return Err(HeroError::InvalidConfig("window size and fps must be positive".into()));
        }
        for slide in self.slides.iter() {
            parse_color(&slide.background)?;
        }
        Ok(())
    }

    pub fn deck(&self) -> Result<Deck> {
        let slides = self
            .slides
            .iter()
            .map(|s| {
                Ok(Slide {
                    kind: s.kind,
                    image: s.image.clone(),
                    background: parse_color(&s.background)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Deck {
            slides,
            overlays: self
                .overlay_images
                .iter()
                .map(|image| OverlayImage { image: image.clone() })
                .collect(),
            footer: self.footer.clone(),
        })
    }
}
