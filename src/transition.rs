use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// +1 or -1, multiplies every entry/exit offset.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Shared timing of every tween in a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub duration: f32,
    pub time_scale: f32,
    pub counter_at: f32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration: TRANSITION_DURATION,
            time_scale: TIME_SCALE,
            counter_at: COUNTER_CUE_AT,
        }
    }
}

impl Timing {
    /// Wall-clock length of a transition once the time scale is applied.
    pub fn wall_duration(&self) -> f32 {
        self.duration / self.time_scale
    }
}

/// An animatable property of one layer of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    OuterX(usize),
    InnerX(usize),
    HeadingWidth(usize),
    HeadingX(usize),
    SlideImageScale(usize),
    OverlayX(usize),
    OverlayScaleX(usize),
    OverlayScaleY(usize),
}

/// `from: None` tweens from whatever value the channel holds when the
/// transition starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub channel: Channel,
    pub from: Option<f32>,
    pub to: f32,
}

impl TweenSpec {
    fn from_to(channel: Channel, from: f32, to: f32) -> Self {
        Self { channel, from: Some(from), to }
    }

    fn to(channel: Channel, to: f32) -> Self {
        Self { channel, from: None, to }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub timing: Timing,
}

impl Transition {
    /// Counter value shown once the cue fires.
    pub fn counter(&self) -> usize {
        self.to + 1
    }

    /// The parallel tween bundle. Every entry starts at offset 0.
    pub fn tweens(&self) -> Vec<TweenSpec> {
        let d = self.direction.sign();
        let (from, to) = (self.from, self.to);

        vec![
            TweenSpec::from_to(Channel::OuterX(to), WRAPPER_SHIFT * d, 0.0),
            TweenSpec::from_to(Channel::InnerX(to), -WRAPPER_SHIFT * d, 0.0),
            // Outgoing heading widens and drifts out from its current state
            TweenSpec::to(Channel::HeadingWidth(from), HEADING_WIDTH_WIDE),
            TweenSpec::to(Channel::HeadingX(from), HEADING_SHIFT * d),
            TweenSpec::from_to(Channel::HeadingWidth(to), HEADING_WIDTH_WIDE, HEADING_WIDTH_REST),
            TweenSpec::from_to(Channel::HeadingX(to), -HEADING_SHIFT * d, 0.0),
            TweenSpec::from_to(Channel::OverlayX(to), OVERLAY_SHIFT * d, 0.0),
            TweenSpec::from_to(Channel::OverlayScaleX(to), OVERLAY_SCALE_X, 1.0),
            TweenSpec::from_to(Channel::OverlayScaleY(to), OVERLAY_SCALE_Y, 1.0),
            TweenSpec::from_to(Channel::OverlayX(from), 0.0, -OVERLAY_SHIFT * d),
            TweenSpec::from_to(Channel::OverlayScaleX(from), 1.0, OVERLAY_SCALE_X),
            TweenSpec::from_to(Channel::OverlayScaleY(from), 1.0, OVERLAY_SCALE_Y),
            TweenSpec::from_to(Channel::SlideImageScale(to), SLIDE_IMAGE_ZOOM, 1.0),
        ]
    }
}
