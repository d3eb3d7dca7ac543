use std::collections::HashMap;
use raylib::prelude::*;
use crate::constants::*;
use crate::scene::{OverlayLayer, Scene, SlideLayer};
use crate::slide::{Deck, Slide};
use crate::texture_loader::Assets;

const HEADING_FONT_SIZE: i32 = 150;
const COUNTER_FONT_SIZE: i32 = 64;
const FOOTER_FONT_SIZE: i32 = 24;

fn screen() -> Rectangle {
    Rectangle::new(0.0, 0.0, RENDER_WIDTH as f32, RENDER_HEIGHT as f32)
}

// Slide image frame, relative to the slide content origin
fn slide_figure(content_x: f32) -> Rectangle {
    let (w, h) = (420.0, 580.0);
    Rectangle::new(
        content_x + (RENDER_WIDTH as f32 - w) * 0.5,
        (RENDER_HEIGHT as f32 - h) * 0.5,
        w,
        h,
    )
}

fn overlay_figure() -> Rectangle {
    let (w, h) = (460.0, 640.0);
    Rectangle::new(RENDER_WIDTH as f32 - w - 120.0, (RENDER_HEIGHT as f32 - h) * 0.5, w, h)
}

pub fn intersect(a: Rectangle, b: Rectangle) -> Option<Rectangle> {
    let x0 = a.x.max(b.x);
    let y0 = a.y.max(b.y);
    let x1 = (a.x + a.width).min(b.x + b.width);
    let y1 = (a.y + a.height).min(b.y + b.height);
    (x1 > x0 && y1 > y0).then(|| Rectangle::new(x0, y0, x1 - x0, y1 - y0))
}

/// Pixel widths of every string the renderer draws, measured once against
/// the default font before the main loop.
#[derive(Debug, Clone, Default)]
pub struct TextMetrics {
    heading_glyphs: HashMap<char, i32>,
    counter_zero: i32,
    footer: i32,
}

impl TextMetrics {
    pub fn measure(rl: &RaylibHandle, deck: &Deck) -> Self {
        let mut buf = [0u8; 4];
        let heading_glyphs = deck
            .slides
            .iter()
            .flat_map(|slide| slide.kind.label().chars())
            .map(|ch| (ch, rl.measure_text(ch.encode_utf8(&mut buf), HEADING_FONT_SIZE)))
            .collect();

        Self {
            heading_glyphs,
            counter_zero: rl.measure_text("0", COUNTER_FONT_SIZE),
            footer: rl.measure_text(&deck.footer, FOOTER_FONT_SIZE),
        }
    }

    fn glyph(&self, ch: char) -> f32 {
        self.heading_glyphs.get(&ch).copied().unwrap_or(0) as f32
    }

    /// Width of a heading drawn glyph by glyph with `spacing` between glyphs.
    fn heading_width(&self, text: &str, spacing: f32) -> f32 {
        let glyphs = text.chars().count() as f32;
        text.chars().map(|ch| self.glyph(ch)).sum::<f32>() + spacing * (glyphs - 1.0).max(0.0)
    }
}

/// The heading's width axis: 200 draws the plain word, wider values open
/// up the letter spacing.
fn heading_spacing(width_axis: f32) -> f32 {
    ((width_axis - HEADING_WIDTH_REST) / (HEADING_WIDTH_WIDE - HEADING_WIDTH_REST)).max(0.0)
        * HEADING_FONT_SIZE as f32
        * 0.5
}

fn draw_spaced_text<D: RaylibDraw>(d: &mut D, metrics: &TextMetrics, text: &str, x: f32, y: f32, spacing: f32, color: Color) {
    let mut cursor = x;
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        d.draw_text(ch.encode_utf8(&mut buf), cursor as i32, y as i32, HEADING_FONT_SIZE, color);
        cursor += metrics.glyph(ch) + spacing;
    }
}

/// Scales `texture` to cover `frame`, then by `scale_x`/`scale_y` around the
/// frame center shifted by `offset_x` pixels.
fn draw_cover<D: RaylibDraw>(d: &mut D, texture: &Texture2D, frame: Rectangle, offset_x: f32, scale_x: f32, scale_y: f32) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    if tex_width <= 0.0 || tex_height <= 0.0 {
        return;
    }

    let cover = (frame.width / tex_width).max(frame.height / tex_height);
    let width = tex_width * cover * scale_x;
    let height = tex_height * cover * scale_y;
    let center = Vector2::new(frame.x + frame.width * 0.5 + offset_x, frame.y + frame.height * 0.5);

    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        Rectangle::new(center.x - width * 0.5, center.y - height * 0.5, width, height),
        Vector2::new(0.0, 0.0),
        0.0,
        Color::WHITE,
    );
}

fn draw_slide<D: RaylibDraw>(
    d: &mut D,
    metrics: &TextMetrics,
    slide: &Slide,
    layer: &SlideLayer,
    texture: Option<&Texture2D>,
) {
    let width = RENDER_WIDTH as f32;
    let outer = Rectangle::new(width * layer.outer_x / 100.0, 0.0, width, RENDER_HEIGHT as f32);
    let Some(clip) = intersect(outer, screen()) else {
        return;
    };

    // The inner wrapper counter-slides inside the outer one
    let content_x = outer.x + width * layer.inner_x / 100.0;
    let figure = slide_figure(content_x);

    let scissor = |r: Rectangle| (r.x as i32, r.y as i32, r.width as i32, r.height as i32);
    let (cx, cy, cw, ch) = scissor(clip);

    {
        let mut s = d.begin_scissor_mode(cx, cy, cw, ch);
        s.draw_rectangle_rec(outer, slide.background);
    }

    if let (Some(texture), Some(frame)) = (texture, intersect(figure, clip)) {
        let (fx, fy, fw, fh) = scissor(frame);
        let mut s = d.begin_scissor_mode(fx, fy, fw, fh);
        draw_cover(&mut s, texture, figure, 0.0, layer.image_scale, layer.image_scale);
    }

    let mut s = d.begin_scissor_mode(cx, cy, cw, ch);
    let label = slide.kind.label();
    let spacing = heading_spacing(layer.heading_width);
    let text_width = metrics.heading_width(label, spacing);
    let x = content_x + (width - text_width) * 0.5 + text_width * layer.heading_x / 100.0;
    let y = (RENDER_HEIGHT - HEADING_FONT_SIZE) as f32 * 0.5;
    draw_spaced_text(&mut s, metrics, label, x, y, spacing, Color::WHITE);
}

fn draw_overlay_image<D: RaylibDraw>(d: &mut D, layer: &OverlayLayer, texture: &Texture2D) {
    let figure = overlay_figure();
    let mut s = d.begin_scissor_mode(figure.x as i32, figure.y as i32, figure.width as i32, figure.height as i32);
    draw_cover(&mut s, texture, figure, figure.width * layer.x / 100.0, layer.scale_x, layer.scale_y);
}

/// Draws the whole hero at render resolution.
pub fn draw_scene<D: RaylibDraw>(d: &mut D, scene: &Scene, deck: &Deck, assets: &Assets, metrics: &TextMetrics) {
    d.clear_background(Color::BLACK);

    let mut sections: Vec<usize> = (0..scene.slides.len()).filter(|&i| scene.slides[i].visible).collect();
    sections.sort_by_key(|&i| scene.slides[i].z_index);
    for i in sections {
        if let Some(slide) = deck.slides.get(i) {
            let texture = assets.slides.get(i).and_then(|t| t.as_ref());
            draw_slide(d, metrics, slide, &scene.slides[i], texture);
        }
    }

    // Overlay section sits above every slide
    let mut overlays: Vec<usize> = (0..scene.overlays.len()).filter(|&i| scene.overlays[i].visible).collect();
    overlays.sort_by_key(|&i| scene.overlays[i].z_index);
    for i in overlays {
        let texture = deck
            .overlay_index_for(i)
            .and_then(|j| assets.overlays.get(j))
            .and_then(|t| t.as_ref());
        if let Some(texture) = texture {
            draw_overlay_image(d, &scene.overlays[i], texture);
        }
    }

    let counter_y = overlay_figure().y as i32 - COUNTER_FONT_SIZE - 24;
    let counter_x = overlay_figure().x as i32;
    d.draw_text("0", counter_x, counter_y, COUNTER_FONT_SIZE, Color::WHITE);
    d.draw_text(
        &scene.counter.to_string(),
        counter_x + metrics.counter_zero + 4,
        counter_y,
        COUNTER_FONT_SIZE,
        Color::WHITE,
    );

    d.draw_text(
        &deck.footer,
        (RENDER_WIDTH - metrics.footer) / 2,
        RENDER_HEIGHT - FOOTER_FONT_SIZE - 32,
        FOOTER_FONT_SIZE,
        Color::new(255, 255, 255, 180),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_overlapping_rectangles() {
        let a = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let b = Rectangle::new(50.0, 25.0, 100.0, 100.0);
        let r = intersect(a, b).unwrap();
        assert_eq!((r.x, r.y, r.width, r.height), (50.0, 25.0, 50.0, 75.0));
    }

    #[test]
    fn disjoint_rectangles_do_not_intersect() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(10.0, 0.0, 10.0, 10.0);
        assert!(intersect(a, b).is_none());
    }

    #[test]
    fn heading_width_adds_spacing_between_glyphs_only() {
        let metrics = TextMetrics {
            heading_glyphs: HashMap::from([('S', 80), ('W', 120), ('I', 20), ('P', 80), ('E', 70)]),
            ..TextMetrics::default()
        };
        assert_eq!(metrics.heading_width("SWIPE", 0.0), 370.0);
        assert_eq!(metrics.heading_width("SWIPE", 10.0), 410.0);
        assert_eq!(metrics.heading_width("", 10.0), 0.0);
        // Glyphs that were never measured take no room
        assert_eq!(metrics.heading_width("S?", 0.0), 80.0);
    }

    #[test]
    fn heading_spacing_follows_width_axis() {
        assert_eq!(heading_spacing(HEADING_WIDTH_REST), 0.0);
        assert_eq!(heading_spacing(HEADING_WIDTH_WIDE), HEADING_FONT_SIZE as f32 * 0.5);
        assert_eq!(heading_spacing(0.0), 0.0);
    }
}
