// Session configuration. Built once at startup, never changed while running.

use crate::error::{Error, Result};
use crate::types::ZoomLevel;

/// Which held key turns the scroll wheel into brush-size changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModifierKey {
    Ctrl,
    Shift,
    Alt,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub brush_radius: u32, // starting brush radius in image pixels
    pub min_brush_radius: u32,
    pub max_brush_radius: u32,
    pub brush_radius_increment: u32,
    pub brush_modifier: ModifierKey,
    pub show_brush_outline: bool,

    pub movement_speed: f64, // pan speed in pixels per second
    pub framerate: u32,

    pub min_zoom: u32, // percent
    pub max_zoom: u32, // percent
    pub zoom_step: u32,

    pub max_window_width: usize,
    pub max_window_height: usize,

    pub legend_font_size: u32, // glyph height in pixels
    pub legend_visible: bool,
    pub legend_lines: Vec<String>,

    pub background_color: u32, // 0x00RRGGBB
    pub fog_color: u32,        // 0x00RRGGBB
}

impl Default for Config {
    fn default() -> Self {
        Self {
            brush_radius: 30,
            min_brush_radius: 5,
            max_brush_radius: 200,
            brush_radius_increment: 5,
            brush_modifier: ModifierKey::Ctrl,
            show_brush_outline: true,
            movement_speed: 500.0,
            framerate: 60,
            min_zoom: 25,
            max_zoom: 200,
            zoom_step: 25,
            max_window_width: 1920,
            max_window_height: 1080,
            legend_font_size: 14,
            legend_visible: true,
            legend_lines: [
                "Left mouse: reveal",
                "Right mouse: hide",
                "Arrow keys: pan",
                "Wheel: zoom in/out",
                "Ctrl + wheel: brush size",
                "R: rotate 90",
                "H: toggle this help",
                "Esc: quit",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            background_color: 0x00_64_64_64,
            fog_color: 0x00_00_00_00,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.zoom_step == 0 {
            return Err(Error::InvalidConfig("zoom_step must be positive".into()));
        }
        if self.min_zoom == 0 || self.min_zoom > 100 || self.max_zoom < 100 {
            return Err(Error::InvalidConfig(format!(
                "zoom range {}..={} must be positive and contain 100",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.brush_radius_increment == 0 || self.min_brush_radius > self.max_brush_radius {
            return Err(Error::InvalidConfig(format!(
                "brush bounds {}..={} step {} are unusable",
                self.min_brush_radius, self.max_brush_radius, self.brush_radius_increment
            )));
        }
        if !(self.min_brush_radius..=self.max_brush_radius).contains(&self.brush_radius) {
            return Err(Error::InvalidConfig(format!(
                "brush radius {} outside {}..={}",
                self.brush_radius, self.min_brush_radius, self.max_brush_radius
            )));
        }
        if self.framerate == 0 {
            return Err(Error::InvalidConfig("framerate must be positive".into()));
        }
        Ok(())
    }

    /// The zoom ladder: every level reachable from 100 by whole steps, ascending.
    pub fn zoom_levels(&self) -> Vec<ZoomLevel> {
        let step = self.zoom_step.max(1);
        let mut levels = Vec::new();
        let mut z = 100;
        while z >= self.min_zoom + step {
            z -= step;
            levels.push(ZoomLevel(z));
        }
        levels.reverse();
        let mut z = 100;
        loop {
            levels.push(ZoomLevel(z));
            if z + step > self.max_zoom {
                break;
            }
            z += step;
        }
        levels
    }

    /// Pixels moved per frame while a pan key is held.
    pub fn pan_per_frame(&self) -> f64 {
        self.movement_speed / f64::from(self.framerate)
    }

    /// Initial window size: the image, capped to the configured maximum.
    pub fn window_size(&self, image_width: u32, image_height: u32) -> (usize, usize) {
        (
            (image_width as usize).min(self.max_window_width).max(1),
            (image_height as usize).min(self.max_window_height).max(1),
        )
    }
}
