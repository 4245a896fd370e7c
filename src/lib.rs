pub mod config;
pub mod constants;
pub mod controller;
pub mod debounce;
pub mod slide;
pub mod surface;
pub mod texture_loader;
pub mod viewer;

pub use config::{CarouselConfig, ConfigError};
pub use controller::{CarouselController, CarouselError, NavKey};
pub use surface::SlideSurface;
