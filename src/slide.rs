use std::fmt;
use raylib::prelude::*;
use serde::{Deserialize, Serialize};
use crate::error::{HeroError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlideKind {
    Scroll,
    Swipe,
}

impl SlideKind {
    pub fn label(self) -> &'static str {
        match self {
            SlideKind::Scroll => "SCROLL",
            SlideKind::Swipe => "SWIPE",
        }
    }
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One full-screen section of the carousel. The heading shows `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub kind: SlideKind,
    pub image: String,
    pub background: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayImage {
    pub image: String,
}

/// Everything the hero renders, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub slides: Vec<Slide>,
    pub overlays: Vec<OverlayImage>,
    pub footer: String,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Overlay shown together with slide `index`. The overlay list is consumed
    /// back to front, so slide 0 pairs with the last overlay image.
    #[cfg(test)]
    pub fn overlay_for(&self, index: usize) -> Option<&OverlayImage> {
        self.overlay_index_for(index).and_then(|i| self.overlays.get(i))
    }

    pub fn overlay_index_for(&self, index: usize) -> Option<usize> {
        self.overlays.len().checked_sub(1)?.checked_sub(index)
    }

    /// What a screen reader should say for slide `index`, e.g. "SWIPE, slide 2 of 4".
    pub fn announcement(&self, index: usize) -> Option<String> {
        let slide = self.slides.get(index)?;
        Some(format!("{}, slide {} of {}", slide.kind, index + 1, self.len()))
    }
}

pub const DEFAULT_SLIDES: [(SlideKind, &str, &str); 4] = [
    (
        SlideKind::Scroll,
        "https://images.unsplash.com/photo-1567016376408-0226e4d0c1ea?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=400",
        "#6d597a",
    ),
    (
        SlideKind::Swipe,
        "https://images.unsplash.com/photo-1558603668-6570496b66f8?crop=entropy&cs=srgb&fm=jpg&q=85&w=400",
        "#355070",
    ),
    (
        SlideKind::Scroll,
        "https://images.unsplash.com/photo-1537165924986-cc3568f5d454?crop=entropy&cs=srgb&fm=jpg&q=85&w=400",
        "#b56576",
    ),
    (
        SlideKind::Swipe,
        "https://images.unsplash.com/photo-1589271243958-d61e12b61b97?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=400",
        "#9a8c98",
    ),
];

pub const DEFAULT_OVERLAY_IMAGES: [&str; 4] = [
    "https://images.unsplash.com/photo-1519710164239-da123dc03ef4?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=800",
    "https://images.unsplash.com/photo-1594666757003-3ee20de41568?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=800",
    "https://images.unsplash.com/photo-1579830341096-05f2f31b8259?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=800",
    "https://images.unsplash.com/photo-1603771628302-c32c88e568e3?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=800",
];

// --- Helper: "#rrggbb" to an opaque raylib color ---
pub fn parse_color(hex: &str) -> Result<Color> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| HeroError::InvalidColor(hex.to_string()))?;

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| HeroError::InvalidColor(hex.to_string()))
    };

    Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255))
}
