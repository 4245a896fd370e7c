use std::time::Duration;

pub const RENDER_WIDTH: i32 = 1920;           // Width of the window at full size
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the window at full size
pub const FPS: u32 = 60;                      // Frames per second

pub const DEFAULT_MIN_SCALE: f64 = 0.3;       // Smallest zoom, also the "previous slide" threshold
pub const DEFAULT_MAX_SCALE: f64 = 2.0;       // Largest zoom
pub const DEFAULT_SCROLL_SENSITIVITY: f64 = 0.01; // Scale change per wheel event
pub const DEFAULT_SWITCH_THRESHOLD: f64 = 1.8;    // Scale that advances to the next slide

pub const RESET_SCALE: f64 = 1.0;             // Scale of a freshly activated slide
pub const MIN_OPACITY: f64 = 0.5;             // Opacity at min scale
pub const MAX_OPACITY: f64 = 1.0;             // Opacity at max scale

pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(150); // Quiet time before scrolling ends

pub const DEFAULT_TEXT_SLIDES: usize = 5;     // Text slides created when nothing else is given
pub const TEXT_FONT_SIZE: i32 = 160;          // Font size of text slides at scale 1
