use crate::constants::*;
use crate::transition::Channel;

/// Visual state of one slide section. Offsets are percentages of the
/// element's own width, like the wrappers they move.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideLayer {
    pub outer_x: f32,
    pub inner_x: f32,
    pub heading_width: f32,
    pub heading_x: f32,
    pub image_scale: f32,
    pub z_index: u8,
    pub visible: bool,
    pub hidden_from_assistive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    pub x: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub z_index: u8,
    pub visible: bool,
}

/// Retained state of everything on screen; the renderer only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub slides: Vec<SlideLayer>,
    pub overlays: Vec<OverlayLayer>,
    pub counter: usize,
}

impl Scene {
    pub fn new(slide_count: usize) -> Self {
        let slides = (0..slide_count)
            .map(|i| {
                let active = i == 0;
                SlideLayer {
                    outer_x: if active { 0.0 } else { WRAPPER_SHIFT },
                    inner_x: if active { 0.0 } else { -WRAPPER_SHIFT },
                    heading_width: HEADING_WIDTH_REST,
                    heading_x: 0.0,
                    image_scale: 1.0,
                    z_index: if active { 2 } else { 0 },
                    visible: active,
                    hidden_from_assistive: !active,
                }
            })
            .collect();

        let overlays = (0..slide_count)
            .map(|i| OverlayLayer {
                x: 0.0,
                scale_x: 1.0,
                scale_y: 1.0,
                z_index: if i == 0 { 2 } else { 0 },
                visible: i == 0,
            })
            .collect();

        Self { slides, overlays, counter: 1 }
    }

    /// Layering before a transition from `from` to `to` starts playing: the
    /// incoming slide covers the outgoing one, while the outgoing overlay
    /// image leaves on top of the incoming one.
    pub fn stage(&mut self, from: usize, to: usize) {
        for slide in self.slides.iter_mut() {
            slide.z_index = 0;
            slide.visible = false;
        }
        for overlay in self.overlays.iter_mut() {
            overlay.z_index = 0;
            overlay.visible = false;
        }

        self.set_slide_layer(from, 1);
        self.set_overlay_layer(to, 1);
        self.set_slide_layer(to, 2);
        self.set_overlay_layer(from, 2);

        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.hidden_from_assistive = i != to;
        }
    }

    /// Layering once a transition has finished: only `active` stays visible.
    pub fn settle(&mut self, active: usize) {
        for (i, slide) in self.slides.iter_mut().enumerate() {
            let on = i == active;
            slide.z_index = if on { 2 } else { 0 };
            slide.visible = on;
            slide.hidden_from_assistive = !on;
        }
        for (i, overlay) in self.overlays.iter_mut().enumerate() {
            let on = i == active;
            overlay.z_index = if on { 2 } else { 0 };
            overlay.visible = on;
        }
    }

    /// The one slide assistive technology may announce.
    pub fn accessible_slide(&self) -> Option<usize> {
        let mut exposed = self.slides.iter().enumerate().filter(|(_, s)| !s.hidden_from_assistive);
        match (exposed.next(), exposed.next()) {
            (Some((i, _)), None) => Some(i),
            _ => None,
        }
    }

    /// The slide currently on top, if exactly one is.
    #[cfg(test)]
    pub fn top_slide(&self) -> Option<usize> {
        let mut top = self.slides.iter().enumerate().filter(|(_, s)| s.visible && s.z_index == 2);
        match (top.next(), top.next()) {
            (Some((i, _)), None) => Some(i),
            _ => None,
        }
    }

    pub fn value(&self, channel: Channel) -> Option<f32> {
        match channel {
            Channel::OuterX(i) => self.slides.get(i).map(|s| s.outer_x),
            Channel::InnerX(i) => self.slides.get(i).map(|s| s.inner_x),
            Channel::HeadingWidth(i) => self.slides.get(i).map(|s| s.heading_width),
            Channel::HeadingX(i) => self.slides.get(i).map(|s| s.heading_x),
            Channel::SlideImageScale(i) => self.slides.get(i).map(|s| s.image_scale),
            Channel::OverlayX(i) => self.overlays.get(i).map(|o| o.x),
            Channel::OverlayScaleX(i) => self.overlays.get(i).map(|o| o.scale_x),
            Channel::OverlayScaleY(i) => self.overlays.get(i).map(|o| o.scale_y),
        }
    }

    pub fn set(&mut self, channel: Channel, value: f32) {
        let slot = match channel {
            Channel::OuterX(i) => self.slides.get_mut(i).map(|s| &mut s.outer_x),
            Channel::InnerX(i) => self.slides.get_mut(i).map(|s| &mut s.inner_x),
            Channel::HeadingWidth(i) => self.slides.get_mut(i).map(|s| &mut s.heading_width),
            Channel::HeadingX(i) => self.slides.get_mut(i).map(|s| &mut s.heading_x),
            Channel::SlideImageScale(i) => self.slides.get_mut(i).map(|s| &mut s.image_scale),
            Channel::OverlayX(i) => self.overlays.get_mut(i).map(|o| &mut o.x),
            Channel::OverlayScaleX(i) => self.overlays.get_mut(i).map(|o| &mut o.scale_x),
            Channel::OverlayScaleY(i) => self.overlays.get_mut(i).map(|o| &mut o.scale_y),
        };
        if let Some(slot) = slot {
            *slot = value;
        }
    }

    fn set_slide_layer(&mut self, index: usize, z_index: u8) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.z_index = z_index;
            slide.visible = true;
        }
    }

    fn set_overlay_layer(&mut self, index: usize, z_index: u8) {
        if let Some(overlay) = self.overlays.get_mut(index) {
            overlay.z_index = z_index;
            overlay.visible = true;
        }
    }
}
