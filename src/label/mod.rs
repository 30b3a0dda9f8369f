pub mod canvas;

use chrono::{Duration, NaiveDateTime};
use embedded_graphics::{pixelcolor::BinaryColor, prelude::Point};
use image::GrayImage;
use thiserror::Error;
use u8g2_fonts::{
    fonts,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
    FontRenderer,
};

use self::canvas::LabelCanvas;
use crate::state::keypad::PREFIX;

pub const TIMESTAMP_FORMAT: &str = "%d/%m-%Y %H:%M";

/// Printable width of 62mm tape.
pub const LABEL_WIDTH: u32 = 800;
pub const TOP_MARGIN: i32 = 50;
pub const LEFT_MARGIN: i32 = 50;
pub const RIGHT_MARGIN: i32 = LABEL_WIDTH as i32 - 50;
pub const Y_SPACING: i32 = 55;
/// Height of a label with only the START and FERDIG rows.
pub const BASE_HEIGHT: u32 = 255;
/// Extra height for the BATCH row, one row pair.
pub const BATCH_ROW_HEIGHT: u32 = 2 * Y_SPACING as u32;

pub const EASTER_EGG_HEIGHT: u32 = 150;
pub const EASTER_EGG_MESSAGE: &str = "Slutt å tull!";

const TIME_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso32_tf>();
const BATCH_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso42_tf>();

const INK: FontColor<BinaryColor> = FontColor::Transparent(BinaryColor::On);

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Could not render label text: {0}")]
    Font(String),
    #[error("Drying time of {hours} hours is out of range")]
    DryingTime { hours: u32 },
}

fn font_error<E: std::fmt::Debug>(error: u8g2_fonts::Error<E>) -> LabelError {
    LabelError::Font(format!("{:?}", error))
}

/// Everything printed on one batch label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelContent {
    pub start: NaiveDateTime,
    pub finish: NaiveDateTime,
    pub batch_code: String,
    pub include_batch_line: bool,
}

impl LabelContent {
    pub fn start_text(&self) -> String {
        self.start.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn finish_text(&self) -> String {
        self.finish.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn height(&self) -> u32 {
        if self.include_batch_line {
            BASE_HEIGHT + BATCH_ROW_HEIGHT
        } else {
            BASE_HEIGHT
        }
    }
}

pub fn build_label(
    now: NaiveDateTime,
    drying_hours: u32,
    batch_code: &str,
) -> Result<LabelContent, LabelError> {
    let finish = now
        .checked_add_signed(Duration::hours(i64::from(drying_hours)))
        .ok_or(LabelError::DryingTime {
            hours: drying_hours,
        })?;

    Ok(LabelContent {
        start: now,
        finish,
        batch_code: batch_code.to_string(),
        include_batch_line: batch_code.trim() != PREFIX,
    })
}

fn draw_row(
    canvas: &mut LabelCanvas,
    font: &FontRenderer,
    row: i32,
    title: &str,
    value: &str,
) -> Result<(), LabelError> {
    let y = TOP_MARGIN + Y_SPACING * row;

    font.render(
        title,
        Point::new(LEFT_MARGIN, y),
        VerticalPosition::Top,
        INK,
        canvas,
    )
    .map_err(font_error)?;

    font.render_aligned(
        value,
        Point::new(RIGHT_MARGIN, y),
        VerticalPosition::Top,
        HorizontalAlignment::Right,
        INK,
        canvas,
    )
    .map_err(font_error)?;

    Ok(())
}

/// Lays out START, FERDIG and the optional BATCH row.
pub fn render_label(content: &LabelContent) -> Result<GrayImage, LabelError> {
    let mut canvas = LabelCanvas::new(LABEL_WIDTH, content.height());

    draw_row(&mut canvas, &TIME_FONT, 0, "START:", &content.start_text())?;
    draw_row(&mut canvas, &TIME_FONT, 2, "FERDIG:", &content.finish_text())?;

    if content.include_batch_line {
        draw_row(&mut canvas, &BATCH_FONT, 4, "BATCH:", &content.batch_code)?;
    }

    Ok(canvas.to_image())
}

pub fn render_easter_egg() -> Result<GrayImage, LabelError> {
    let mut canvas = LabelCanvas::new(LABEL_WIDTH, EASTER_EGG_HEIGHT);

    TIME_FONT
        .render_aligned(
            EASTER_EGG_MESSAGE,
            Point::new(LABEL_WIDTH as i32 / 2, EASTER_EGG_HEIGHT as i32 / 2),
            VerticalPosition::Center,
            HorizontalAlignment::Center,
            INK,
            &mut canvas,
        )
        .map_err(font_error)?;

    Ok(canvas.to_image())
}

#[cfg(test)]
mod tests {
    use super::canvas::INK as INK_PIXEL;
    use super::*;
    use chrono::NaiveDate;

    fn morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 22)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .expect("valid date")
    }

    fn content_at(now: NaiveDateTime, hours: u32, code: &str) -> LabelContent {
        build_label(now, hours, code).expect("label")
    }

    fn inked_rows(image: &GrayImage, from: u32, to: u32) -> bool {
        (from..to.min(image.height()))
            .any(|y| (0..image.width()).any(|x| *image.get_pixel(x, y) == INK_PIXEL))
    }

    #[test]
    fn finish_is_drying_hours_later() {
        let content = content_at(morning(), 19, "0001234");

        assert_eq!(content.start_text(), "22/01-2025 10:00");
        assert_eq!(content.finish_text(), "23/01-2025 05:00");
        assert!(content.include_batch_line);
        assert_eq!(content.batch_code, "0001234");
    }

    #[test]
    fn timestamps_are_zero_padded() {
        let early = NaiveDate::from_ymd_opt(2025, 3, 4)
            .and_then(|d| d.and_hms_opt(7, 5, 0))
            .expect("valid date");
        let content = content_at(early, 1, "000");

        assert_eq!(content.start_text(), "04/03-2025 07:05");
        assert_eq!(content.finish_text(), "04/03-2025 08:05");
    }

    #[test]
    fn huge_drying_time_is_an_error() {
        match build_label(morning(), u32::MAX, "000") {
            Err(LabelError::DryingTime { hours }) => assert_eq!(hours, u32::MAX),
            other => panic!("expected drying time error, got {:?}", other),
        }
    }

    #[test]
    fn bare_prefix_hides_batch_line() {
        assert!(!content_at(morning(), 19, "000").include_batch_line);
        assert!(!content_at(morning(), 19, " 000 ").include_batch_line);
        assert!(content_at(morning(), 19, "0009").include_batch_line);
    }

    #[test]
    fn raw_code_is_kept() {
        let content = content_at(morning(), 19, " 0005 ");
        assert_eq!(content.batch_code, " 0005 ");
    }

    #[test]
    fn batch_line_grows_canvas() {
        let with_batch = render_label(&content_at(morning(), 19, "0001234")).expect("render");
        let without = render_label(&content_at(morning(), 19, "000")).expect("render");

        assert_eq!(with_batch.width(), LABEL_WIDTH);
        assert_eq!(with_batch.height(), BASE_HEIGHT + BATCH_ROW_HEIGHT);
        assert_eq!(without.height(), BASE_HEIGHT);
        assert!(without.height() < with_batch.height());
    }

    #[test]
    fn rows_are_drawn_where_expected() {
        let image = render_label(&content_at(morning(), 19, "0001234")).expect("render");

        let start_row = TOP_MARGIN as u32;
        let finish_row = (TOP_MARGIN + 2 * Y_SPACING) as u32;
        let batch_row = (TOP_MARGIN + 4 * Y_SPACING) as u32;

        assert!(!inked_rows(&image, 0, start_row - 5));
        assert!(inked_rows(&image, start_row, start_row + 45));
        assert!(inked_rows(&image, finish_row, finish_row + 45));
        assert!(inked_rows(&image, batch_row, batch_row + 55));
    }

    #[test]
    fn values_are_right_aligned() {
        let image = render_label(&content_at(morning(), 19, "000")).expect("render");

        let rightmost = (0..image.width())
            .rev()
            .find(|x| (0..image.height()).any(|y| *image.get_pixel(*x, y) == INK_PIXEL))
            .expect("some ink");
        let leftmost = (0..image.width())
            .find(|x| (0..image.height()).any(|y| *image.get_pixel(*x, y) == INK_PIXEL))
            .expect("some ink");

        assert!(rightmost <= RIGHT_MARGIN as u32 + 1);
        assert!(rightmost > RIGHT_MARGIN as u32 - 20);
        assert!(leftmost >= LEFT_MARGIN as u32 - 1);
        assert!(leftmost < LEFT_MARGIN as u32 + 20);
    }

    #[test]
    fn easter_egg_is_single_row() {
        let image = render_easter_egg().expect("render");

        assert_eq!(image.dimensions(), (LABEL_WIDTH, EASTER_EGG_HEIGHT));
        assert!(inked_rows(&image, 40, 110));
        assert!(!inked_rows(&image, 0, 20));
    }
}
