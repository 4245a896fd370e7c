/// What the carousel needs from a slide: somewhere to write the zoom, the
/// opacity and the active marker.
pub trait SlideSurface {
    fn set_scale(&mut self, scale: f64);
    fn set_opacity(&mut self, opacity: f64);
    fn set_active(&mut self, active: bool);
    fn is_active(&self) -> bool;
}
