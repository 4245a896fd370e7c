use std::time::Instant;
use log::debug;
use raylib::prelude::*;
use crate::config::CarouselConfig;
use crate::controller::{CarouselController, CarouselError, NavKey};
use crate::slide::Slide;

const NAV_KEYS: [(KeyboardKey, NavKey); 2] = [
    (KeyboardKey::KEY_DOWN, NavKey::ArrowDown),
    (KeyboardKey::KEY_UP, NavKey::ArrowUp),
];

/// Raylib host of the carousel: feeds window input into the controller and
/// draws the active slide.
pub struct Viewer {
    carousel: CarouselController<Slide>,
    inserted: usize,
}

impl Viewer {
    pub fn new(slides: Vec<Slide>, config: CarouselConfig) -> Result<Self, CarouselError> {
        Ok(Self {
            carousel: CarouselController::new(slides, config)?,
            inserted: 0,
        })
    }

    /// Polls this frame's input. Called once per frame before drawing.
    pub fn update(&mut self, rl: &mut RaylibHandle, now: Instant) {
        self.carousel.tick(now);

        // Raylib reports wheel-up as positive, the carousel expects a
        // downward delta for zoom-in. One event per frame with movement.
        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            self.carousel.handle_wheel_scroll(-f64::from(wheel), now);
        }

        for (key, nav) in NAV_KEYS {
            if rl.is_key_pressed(key) {
                self.carousel.handle_keyboard(nav);
            }
        }

        if rl.is_key_pressed(KeyboardKey::KEY_N) {
            self.inserted += 1;
            let label = format!("new{}", self.inserted);
            debug!("Appending text slide {label}");
            self.carousel.insert_slide(Slide::text(label));
        }
        if rl.is_key_pressed(KeyboardKey::KEY_DELETE) {
            let index = self.carousel.current_index();
            self.carousel.remove_slide(index);
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        d.clear_background(Color::BLACK);

        // Only the active slide is shown
        self.carousel.active_slide().draw(d);

        let status = format!(
            "{}/{}  scale {:.2}{}",
            self.carousel.current_index() + 1,
            self.carousel.total_slides(),
            self.carousel.current_scale(),
            if self.carousel.is_scrolling() { "  scrolling" } else { "" }
        );
        d.draw_text(&status, 20, 20, 20, Color::LIGHTGRAY);
    }
}
