pub mod components;
pub mod screens;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb888,
    primitives::PrimitiveStyle,
};
use profont::PROFONT_24_POINT;
use u8g2_fonts::{fonts, FontRenderer};

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 480;

/// Colors and spacing shared by both screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb888,
    pub button: Rgb888,
    pub button_active: Rgb888,
    pub button_disabled: Rgb888,
    pub button_text: Rgb888,
    pub text: Rgb888,
    pub accent: Rgb888,
    pub muted: Rgb888,
    pub corner_radius: u32,
    pub border_width: u32,
    pub margin: i32,
}

pub const THEME: Theme = Theme {
    background: Rgb888::new(0xff, 0xff, 0xff),
    button: Rgb888::new(0xff, 0x19, 0x10),
    button_active: Rgb888::new(0xcc, 0x14, 0x0c),
    button_disabled: Rgb888::new(0xcc, 0xcc, 0xcc),
    button_text: Rgb888::new(0xff, 0xff, 0xff),
    text: Rgb888::new(0x00, 0x00, 0x00),
    accent: Rgb888::new(0xff, 0x19, 0x10),
    muted: Rgb888::new(0xcc, 0xcc, 0xcc),
    corner_radius: 6,
    border_width: 3,
    margin: 20,
};

impl Theme {
    pub fn fill(&self, color: Rgb888) -> PrimitiveStyle<Rgb888> {
        PrimitiveStyle::with_fill(color)
    }

    pub fn outline(&self, color: Rgb888) -> PrimitiveStyle<Rgb888> {
        PrimitiveStyle::with_stroke(color, self.border_width)
    }

    pub fn button_text_style(&self) -> MonoTextStyle<'static, Rgb888> {
        MonoTextStyle::new(&PROFONT_24_POINT, self.button_text)
    }
}

/// Large display font for the batch number and titles.
pub const DISPLAY_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso42_tf>();
pub const TITLE_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso32_tf>();
/// Body text, covers Latin-1 for the Norwegian labels.
pub const BODY_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_profont29_mf>();
pub const DIALOG_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_profont17_mf>();
