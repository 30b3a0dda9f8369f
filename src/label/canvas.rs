use core::convert::TryInto;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use image::{GrayImage, Luma};

pub const INK: Luma<u8> = Luma([0]);
pub const PAPER: Luma<u8> = Luma([255]);

/// A monochrome label framebuffer, `BinaryColor::On` is ink.
pub struct LabelCanvas {
    width: u32,
    height: u32,
    /// The framebuffer with a single byte per pixel, row major
    framebuffer: Vec<u8>,
}

impl LabelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            framebuffer: vec![0; (width * height) as usize],
        }
    }

    pub fn is_inked(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.framebuffer[(y * self.width + x) as usize] == 1
    }

    /// Converts to a grayscale image, black ink on white paper.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.is_inked(x, y) {
                INK
            } else {
                PAPER
            }
        })
    }
}

impl DrawTarget for LabelCanvas {
    type Color = BinaryColor;
    // Drawing only touches the framebuffer and cannot fail.
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels.into_iter() {
            // Out of bounds pixels are discarded.
            if let Ok((x, y)) = TryInto::<(u32, u32)>::try_into(coord) {
                if x < self.width && y < self.height {
                    let index = y * self.width + x;
                    self.framebuffer[index as usize] = color.is_on() as u8;
                }
            }
        }

        Ok(())
    }
}

impl OriginDimensions for LabelCanvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
