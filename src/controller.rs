//! Zoom carousel state machine.
//!
//! Wheel input grows or shrinks the active slide; once the zoom crosses the
//! switch threshold (or drops to the minimum scale) the neighbouring slide
//! becomes active. The carousel never wraps: at either end the switch is
//! refused and the zoom stays pinned near the threshold.

use std::time::Instant;

use log::{debug, info, trace};
use thiserror::Error;

use crate::config::CarouselConfig;
use crate::constants::*;
use crate::debounce::Debounce;
use crate::surface::SlideSurface;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("a carousel needs at least one slide")]
    NoSlides,
}

/// Navigation keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
}

pub struct CarouselController<S: SlideSurface> {
    slides: Vec<S>,
    config: CarouselConfig,

    current_index: usize,
    current_scale: f64,

    is_scrolling: bool,
    scroll_debounce: Debounce,
}

impl<S: SlideSurface> CarouselController<S> {
    /// Binds to `slides`, activates the first one and renders it.
    pub fn new(slides: Vec<S>, config: CarouselConfig) -> Result<Self, CarouselError> {
        if slides.is_empty() {
            return Err(CarouselError::NoSlides);
        }

        let mut controller = Self {
            slides,
            config,
            current_index: 0,
            current_scale: RESET_SCALE,
            is_scrolling: false,
            scroll_debounce: Debounce::new(SCROLL_DEBOUNCE),
        };
        controller.initialize_slides();
        controller.render();

        info!(
            "Carousel ready with {} slides (scale {}..{}, threshold {}, sensitivity {})",
            controller.slides.len(),
            config.min_scale(),
            config.max_scale(),
            config.switch_threshold(),
            config.scroll_sensitivity()
        );
        Ok(controller)
    }

    /// One wheel event. Positive `delta_y` zooms in, anything else zooms out.
    pub fn handle_wheel_scroll(&mut self, delta_y: f64, now: Instant) {
        self.is_scrolling = true;
        self.scroll_debounce.arm(now);

        let direction = if delta_y > 0.0 { 1.0 } else { -1.0 };
        self.current_scale += direction * self.config.scroll_sensitivity();
        trace!("Wheel {delta_y}: scale now {:.3}", self.current_scale);

        // Checked against the unclamped scale
        self.check_item_switch();
        self.render();
    }

    /// Returns true when the key moved to another slide.
    pub fn handle_keyboard(&mut self, key: NavKey) -> bool {
        match key {
            NavKey::ArrowUp => self.switch_relative(false),
            NavKey::ArrowDown => self.switch_relative(true),
        }
    }

    /// Debounce timer callback: ends the scrolling state once the wheel has
    /// been quiet for the debounce window.
    pub fn tick(&mut self, now: Instant) {
        if self.scroll_debounce.poll(now) {
            self.is_scrolling = false;
            trace!("Scrolling ended");
        }
    }

    /// Makes `target_index` the active slide with a fresh zoom.
    ///
    /// Out-of-range targets are ignored and leave the state untouched.
    pub fn switch_to_item(&mut self, target_index: usize) -> bool {
        if target_index >= self.slides.len() {
            debug!(
                "Ignoring switch to slide {target_index}, carousel has {} slides",
                self.slides.len()
            );
            return false;
        }

        self.slides[self.current_index].set_active(false);
        self.current_index = target_index;
        self.current_scale = RESET_SCALE;
        self.slides[self.current_index].set_active(true);
        self.render();

        debug!("Switched to slide {target_index}");
        true
    }

    /// Clamps the zoom and writes scale and opacity onto the active slide.
    /// Inactive slides keep whatever they were last given.
    pub fn render(&mut self) {
        self.current_scale = self.config.clamp_scale(self.current_scale);
        let opacity = self.config.opacity_for(self.current_scale);

        if let Some(slide) = self.slides.get_mut(self.current_index) {
            slide.set_scale(self.current_scale);
            slide.set_opacity(opacity);
        }
    }

    /// Appends a slide. The active slide does not change.
    pub fn insert_slide(&mut self, slide: S) {
        self.slides.push(slide);
        self.initialize_slides();
        debug!("Inserted slide, carousel has {} slides", self.slides.len());
    }

    /// Removes the slide at `index` and returns it.
    ///
    /// Invalid indices and the last remaining slide are left alone. The
    /// current index is only moved when it falls off the end.
    pub fn remove_slide(&mut self, index: usize) -> Option<S> {
        if index >= self.slides.len() || self.slides.len() == 1 {
            debug!(
                "Ignoring removal of slide {index}, carousel has {} slides",
                self.slides.len()
            );
            return None;
        }

        let removed = self.slides.remove(index);
        if self.current_index >= self.slides.len() {
            self.current_index = self.slides.len() - 1;
        }
        self.initialize_slides();
        self.render();

        debug!(
            "Removed slide {index}, carousel has {} slides, active {}",
            self.slides.len(),
            self.current_index
        );
        Some(removed)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_scale(&self) -> f64 {
        self.current_scale
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn slides(&self) -> &[S] {
        &self.slides
    }

    pub fn active_slide(&self) -> &S {
        &self.slides[self.current_index]
    }

    fn check_item_switch(&mut self) {
        if self.current_scale >= self.config.switch_threshold() {
            self.switch_relative(true);
        } else if self.current_scale <= self.config.min_scale() {
            self.switch_relative(false);
        }
    }

    fn switch_relative(&mut self, forward: bool) -> bool {
        let target = if forward {
            Some(self.current_index + 1).filter(|&target| target < self.slides.len())
        } else {
            self.current_index.checked_sub(1)
        };
        match target {
            Some(target) => self.switch_to_item(target),
            None => {
                debug!(
                    "Already at the {} slide",
                    if forward { "last" } else { "first" }
                );
                false
            }
        }
    }

    fn initialize_slides(&mut self) {
        let current = self.current_index;
        for (index, slide) in self.slides.iter_mut().enumerate() {
            slide.set_active(index == current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, Default, Clone)]
    struct MockSlide {
        scale: Option<f64>,
        opacity: Option<f64>,
        active: bool,
        writes: usize,
    }

    impl SlideSurface for MockSlide {
        fn set_scale(&mut self, scale: f64) {
            self.scale = Some(scale);
            self.writes += 1;
        }

        fn set_opacity(&mut self, opacity: f64) {
            self.opacity = Some(opacity);
        }

        fn set_active(&mut self, active: bool) {
            self.active = active;
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn carousel(count: usize) -> CarouselController<MockSlide> {
        CarouselController::new(vec![MockSlide::default(); count], CarouselConfig::default())
            .expect("non-empty carousel")
    }

    fn assert_invariants(c: &CarouselController<MockSlide>) {
        assert!(c.current_index() < c.total_slides());
        let active: Vec<usize> = c
            .slides()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_active())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(active, vec![c.current_index()]);
        let config = c.config();
        assert!(c.current_scale() >= config.min_scale());
        assert!(c.current_scale() <= config.max_scale());
    }

    fn scroll(c: &mut CarouselController<MockSlide>, delta_y: f64, times: usize, now: Instant) {
        for _ in 0..times {
            c.handle_wheel_scroll(delta_y, now);
        }
    }

    #[test]
    fn empty_carousel_is_rejected() {
        let result = CarouselController::<MockSlide>::new(Vec::new(), CarouselConfig::default());
        assert_eq!(result.err(), Some(CarouselError::NoSlides));
    }

    #[test]
    fn new_activates_first_slide_only() {
        let mut slides = vec![MockSlide::default(); 4];
        slides[2].active = true;
        let c = CarouselController::new(slides, CarouselConfig::default()).unwrap();

        assert_eq!(c.current_index(), 0);
        assert_eq!(c.current_scale(), 1.0);
        assert!(!c.is_scrolling());
        assert_invariants(&c);

        let first = &c.slides()[0];
        assert_eq!(first.scale, Some(1.0));
        assert!((first.opacity.unwrap() - 0.705_882).abs() < 1e-4);
        assert!(c.slides()[1..].iter().all(|s| s.scale.is_none()));
    }

    #[test]
    fn exactly_eighty_wheel_steps_switch_forward() {
        let mut c = carousel(3);
        let now = Instant::now();

        scroll(&mut c, 1.0, 79, now);
        assert_eq!(c.current_index(), 0);
        assert!(c.current_scale() < 1.8);

        c.handle_wheel_scroll(1.0, now);
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.current_scale(), 1.0);
        assert_invariants(&c);
    }

    #[test]
    fn shrinking_to_min_scale_switches_back() {
        let mut c = carousel(3);
        let now = Instant::now();
        assert!(c.switch_to_item(1));

        scroll(&mut c, -1.0, 69, now);
        assert_eq!(c.current_index(), 1);

        c.handle_wheel_scroll(-1.0, now);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.current_scale(), 1.0);
        assert_invariants(&c);
    }

    #[test]
    fn zero_delta_counts_as_zoom_out() {
        let mut c = carousel(2);
        c.handle_wheel_scroll(0.0, Instant::now());
        assert!((c.current_scale() - 0.99).abs() < 1e-9);
    }

    #[test]
    fn first_slide_never_goes_below_zero() {
        let mut c = carousel(3);
        let now = Instant::now();

        for _ in 0..300 {
            c.handle_wheel_scroll(-3.0, now);
            assert_invariants(&c);
        }
        assert_eq!(c.current_index(), 0);
        // Pinned at the minimum
        assert_eq!(c.current_scale(), 0.3);
        assert!((c.slides()[0].opacity.unwrap() - MIN_OPACITY).abs() < 1e-12);

        for _ in 0..10 {
            assert!(!c.handle_keyboard(NavKey::ArrowUp));
        }
        assert_eq!(c.current_index(), 0);
        assert_invariants(&c);
    }

    #[test]
    fn last_slide_never_goes_past_end() {
        let mut c = carousel(3);
        let now = Instant::now();
        assert!(c.switch_to_item(2));

        for _ in 0..300 {
            c.handle_wheel_scroll(5.0, now);
            assert_invariants(&c);
        }
        assert_eq!(c.current_index(), 2);
        // Pinned at the top of the range rather than bouncing back
        assert_eq!(c.current_scale(), 2.0);

        assert!(!c.handle_keyboard(NavKey::ArrowDown));
        assert_eq!(c.current_index(), 2);
        assert_invariants(&c);
    }

    #[test]
    fn stuck_at_end_keeps_scale_near_threshold() {
        let mut c = carousel(1);
        let now = Instant::now();

        scroll(&mut c, 1.0, 80, now);
        assert_eq!(c.current_index(), 0);
        assert!(c.current_scale() >= 1.8);
        assert!(c.current_scale() < 1.81);
    }

    #[test]
    fn keyboard_moves_one_slide_and_resets_scale() {
        let mut c = carousel(3);
        let now = Instant::now();
        scroll(&mut c, 1.0, 30, now);

        assert!(c.handle_keyboard(NavKey::ArrowDown));
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.current_scale(), 1.0);

        scroll(&mut c, -1.0, 20, now);
        assert!(c.handle_keyboard(NavKey::ArrowUp));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.current_scale(), 1.0);
        assert_invariants(&c);
    }

    #[test]
    fn refused_moves_at_both_ends_leave_state_untouched() {
        let mut c = carousel(2);
        let now = Instant::now();
        scroll(&mut c, 1.0, 10, now);
        let scale = c.current_scale();

        assert!(!c.handle_keyboard(NavKey::ArrowUp));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.current_scale(), scale);

        assert!(c.handle_keyboard(NavKey::ArrowDown));
        scroll(&mut c, 1.0, 10, now);
        let scale = c.current_scale();

        assert!(!c.handle_keyboard(NavKey::ArrowDown));
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.current_scale(), scale);
        assert_invariants(&c);
    }

    #[test]
    fn switch_resets_scale_from_any_value() {
        let mut c = carousel(4);
        let now = Instant::now();

        for (steps, delta) in [(10, 1.0), (60, -1.0), (75, 1.0)] {
            scroll(&mut c, delta, steps, now);
            let target = (c.current_index() + 2) % c.total_slides();
            assert!(c.switch_to_item(target));
            assert_eq!(c.current_scale(), 1.0);
            assert_eq!(c.active_slide().scale, Some(1.0));
        }
    }

    #[test]
    fn switch_out_of_range_is_ignored() {
        let mut c = carousel(3);
        let now = Instant::now();
        scroll(&mut c, 1.0, 10, now);
        let scale = c.current_scale();

        assert!(!c.switch_to_item(3));
        assert!(!c.switch_to_item(usize::MAX));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.current_scale(), scale);
        assert_invariants(&c);
    }

    #[test]
    fn deactivated_slide_keeps_its_last_render() {
        let mut c = carousel(2);
        let now = Instant::now();
        scroll(&mut c, 1.0, 50, now);
        let zoomed = c.current_scale();

        assert!(c.handle_keyboard(NavKey::ArrowDown));

        let old = &c.slides()[0];
        assert!(!old.active);
        assert_eq!(old.scale, Some(zoomed));
        assert_eq!(c.slides()[1].scale, Some(1.0));
    }

    #[test]
    fn render_only_touches_active_slide() {
        let mut c = carousel(3);
        let before: Vec<usize> = c.slides().iter().map(|s| s.writes).collect();

        c.render();

        assert_eq!(c.slides()[0].writes, before[0] + 1);
        assert_eq!(c.slides()[1].writes, before[1]);
        assert_eq!(c.slides()[2].writes, before[2]);
    }

    #[test]
    fn scrolling_clears_after_quiet_window() {
        let mut c = carousel(2);
        let start = Instant::now();

        c.handle_wheel_scroll(1.0, start);
        assert!(c.is_scrolling());

        c.tick(start + Duration::from_millis(100));
        assert!(c.is_scrolling());

        c.handle_wheel_scroll(1.0, start + Duration::from_millis(100));
        c.tick(start + Duration::from_millis(200));
        assert!(c.is_scrolling());

        c.tick(start + Duration::from_millis(250));
        assert!(!c.is_scrolling());
    }

    #[test]
    fn keyboard_does_not_start_scrolling() {
        let mut c = carousel(2);
        c.handle_keyboard(NavKey::ArrowDown);
        assert!(!c.is_scrolling());
    }

    #[test]
    fn insert_appends_without_changing_active() {
        let mut c = carousel(2);
        c.switch_to_item(1);

        let mut extra = MockSlide::default();
        extra.active = true;
        c.insert_slide(extra);

        assert_eq!(c.total_slides(), 3);
        assert_eq!(c.current_index(), 1);
        assert_invariants(&c);

        assert!(c.handle_keyboard(NavKey::ArrowDown));
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn remove_clamps_index_past_end() {
        let mut c = carousel(3);
        c.switch_to_item(2);

        assert!(c.remove_slide(2).is_some());
        assert_eq!(c.total_slides(), 2);
        assert_eq!(c.current_index(), 1);
        assert_invariants(&c);
    }

    #[test]
    fn remove_before_current_keeps_index() {
        let mut c = carousel(4);
        c.switch_to_item(2);

        assert!(c.remove_slide(0).is_some());
        assert_eq!(c.current_index(), 2);
        assert_invariants(&c);
    }

    #[test]
    fn remove_invalid_index_is_ignored() {
        let mut c = carousel(2);
        assert!(c.remove_slide(2).is_none());
        assert_eq!(c.total_slides(), 2);
        assert_invariants(&c);
    }

    #[test]
    fn remove_last_remaining_slide_is_ignored() {
        let mut c = carousel(1);
        assert!(c.remove_slide(0).is_none());
        assert_eq!(c.total_slides(), 1);
        assert_invariants(&c);
    }

    #[test]
    fn mixed_input_keeps_invariants() {
        let mut c = carousel(5);
        let start = Instant::now();

        for step in 0..2_000u64 {
            let now = start + Duration::from_millis(step * 7);
            match step % 11 {
                0 => {
                    c.handle_keyboard(NavKey::ArrowDown);
                }
                5 => {
                    c.handle_keyboard(NavKey::ArrowUp);
                }
                3 | 4 | 8 => c.handle_wheel_scroll(-1.0, now),
                _ => c.handle_wheel_scroll(1.0, now),
            }
            c.tick(now);
            assert_invariants(&c);
        }
    }
}
