// Core types shared by the pyramid, the fog layer and the viewport.

use image::{RgbaImage, imageops};

/// The presentation surface. What gets pushed to the window every frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the surface is on screen (pixels)
    pub height: usize,    // how tall the surface is on screen (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0; width * height] }
    }

    /// Reallocate to a new size. Contents are undefined until the next clear.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.resize(width * height, 0);
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

/// A zoom level as an integer percentage (100 = original size).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoomLevel(pub u32);

impl ZoomLevel {
    pub const IDENTITY: ZoomLevel = ZoomLevel(100);

    pub fn percent(self) -> u32 {
        self.0
    }

    pub fn scale(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Pixel size of an axis of length `dim` at this level. Never zero.
    pub fn scaled_dim(self, dim: u32) -> u32 {
        ((f64::from(dim) * self.scale()).round() as u32).max(1)
    }
}

/// Accumulated clockwise rotation of the view, in quarter turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// One more quarter turn clockwise.
    pub fn next(self) -> Self {
        match self {
            Rotation::None => Rotation::Cw90,
            Rotation::Cw90 => Rotation::Cw180,
            Rotation::Cw180 => Rotation::Cw270,
            Rotation::Cw270 => Rotation::None,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    /// Produce a copy of `img` turned by this rotation.
    pub fn apply(self, img: &RgbaImage) -> RgbaImage {
        match self {
            Rotation::None => img.clone(),
            Rotation::Cw90 => imageops::rotate90(img),
            Rotation::Cw180 => imageops::rotate180(img),
            Rotation::Cw270 => imageops::rotate270(img),
        }
    }
}

/// Pack an 8-bit RGB triple as 0x00RRGGBB.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}
