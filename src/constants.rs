pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second

pub const TRANSITION_DURATION: f32 = 1.0;     // Timeline length of one transition (timeline seconds)
pub const TIME_SCALE: f32 = 0.8;              // Playback speed of every transition timeline
pub const COUNTER_CUE_AT: f32 = 0.32;         // Timeline offset of the counter text update

pub const GESTURE_TOLERANCE: f32 = 10.0;      // Dead-zone before a gesture registers (pixels)
pub const WHEEL_SPEED: f32 = -1.0;            // Wheel delta multiplier, negative flips scroll direction
pub const WHEEL_STEP_PIXELS: f32 = 100.0;     // Pixels per wheel notch

pub const HEADING_WIDTH_REST: f32 = 200.0;    // Heading width axis while a slide is settled
pub const HEADING_WIDTH_WIDE: f32 = 800.0;    // Heading width axis at the edges of a transition
pub const HEADING_SHIFT: f32 = 30.0;          // Heading x offset in percent of its own width
pub const WRAPPER_SHIFT: f32 = 100.0;         // Outer/inner wrapper x offset in percent
pub const OVERLAY_SHIFT: f32 = 125.0;         // Overlay image x offset in percent
pub const OVERLAY_SCALE_X: f32 = 1.5;
pub const OVERLAY_SCALE_Y: f32 = 1.3;
pub const SLIDE_IMAGE_ZOOM: f32 = 2.0;        // Slide image scale when it starts entering

pub const FOOTER_CAPTION: &str = "design is how it works";
