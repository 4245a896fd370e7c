use raylib::prelude::*;
use crate::constants::*;
use crate::surface::SlideSurface;

pub enum SlideContent {
    Image(Texture2D),
    Text(String),
}

pub struct Slide {
    content: SlideContent,

    active: bool,
    scale: f32,
    opacity: f32,
}

impl Slide {
    pub fn image(texture: Texture2D) -> Self {
        Self::new(SlideContent::Image(texture))
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::new(SlideContent::Text(label.into()))
    }

    fn new(content: SlideContent) -> Self {
        Self {
            content,
            active: false,
            scale: RESET_SCALE as f32,
            opacity: MAX_OPACITY as f32,
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        if !self.active {
            return;
        }

        let screen_width = d.get_screen_width() as f32;
        let screen_height = d.get_screen_height() as f32;
        let center = Vector2::new(screen_width * 0.5, screen_height * 0.5);
        let tint = Color::WHITE.fade(self.opacity);

        match &self.content {
            SlideContent::Image(texture) => {
                let tex_width = texture.width() as f32;
                let tex_height = texture.height() as f32;

                // Scale too big images to fit the screen, then apply the zoom
                let fit_scale = (screen_width * 0.9 / tex_width)
                    .min(screen_height * 0.9 / tex_height)
                    .min(1.0);
                let scaled_width = tex_width * fit_scale * self.scale;
                let scaled_height = tex_height * fit_scale * self.scale;

                // Relative to the dest rectangle (ie. the center of the image)
                let origin = Vector2::new(scaled_width * 0.5, scaled_height * 0.5);

                d.draw_texture_pro(
                    texture,
                    Rectangle::new(0.0, 0.0, tex_width, tex_height),
                    Rectangle::new(center.x, center.y, scaled_width, scaled_height),
                    origin,
                    0.0,
                    tint,
                );
            }
            SlideContent::Text(label) => {
                let card_width = screen_width * 0.5 * self.scale;
                let card_height = screen_height * 0.5 * self.scale;
                d.draw_rectangle_rec(
                    Rectangle::new(
                        center.x - card_width * 0.5,
                        center.y - card_height * 0.5,
                        card_width,
                        card_height,
                    ),
                    Color::DARKBLUE.fade(self.opacity),
                );

                let font_size = ((TEXT_FONT_SIZE as f32 * self.scale) as i32).max(1);
                let text_width = measure_text(label, font_size);
                d.draw_text(
                    label,
                    center.x as i32 - text_width / 2,
                    center.y as i32 - font_size / 2,
                    font_size,
                    tint,
                );
            }
        }
    }
}

impl SlideSurface for Slide {
    fn set_scale(&mut self, scale: f64) {
        self.scale = scale as f32;
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity as f32;
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
