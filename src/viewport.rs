//! Viewport controller.
//!
//! Owns the session state, turns one frame of input into state changes and
//! fog brush strokes, and composites map + fog + overlays into the
//! presentation surface. The base image and the fog mask are only ever
//! changed together (see [`Viewport::apply_zoom`] and
//! [`Viewport::apply_rotation`]) so they always agree on size and orientation.

use image::RgbaImage;
use tracing::{debug, info};

use crate::config::Config;
use crate::draw::{draw_circle, draw_text_block};
use crate::error::{Error, Result};
use crate::fog::FogLayer;
use crate::input::{FrameInput, HeldKeys, InputEvent, PointerButton, ScrollDirection};
use crate::pyramid::ImagePyramid;
use crate::types::{FrameBuffer, Rotation, ZoomLevel, pack_rgb};

const LEGEND_ANCHOR: (i32, i32) = (10, 10);
const LEGEND_COLOR: u32 = 0x00_FF_FF_FF;
const BRUSH_OUTLINE_COLOR: u32 = 0x00_FF_CC_33;

/// Mutable session state. Only the viewport changes it.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub pan_x: f64, // screen pixels, unbounded
    pub pan_y: f64,
    pub zoom_index: usize, // position in the pyramid ladder
    pub brush_radius: u32,
    pub rotation: Rotation,
    pub reveal_held: bool,
    pub hide_held: bool,
    pub legend_visible: bool,
    pub running: bool,
}

pub struct Viewport {
    config: Config,
    pyramid: ImagePyramid,
    active: RgbaImage, // pyramid level at the current zoom, turned by `state.rotation`
    fog: FogLayer,
    state: ViewState,
    surface: FrameBuffer,
    pointer: Option<(f32, f32)>,
}

impl Viewport {
    /// Start at 100% zoom, unrotated, everything fogged.
    pub fn new(config: Config, pyramid: ImagePyramid, surface_size: (usize, usize)) -> Result<Self> {
        config.validate()?;
        let zoom_index = pyramid
            .index_of(ZoomLevel::IDENTITY)
            .ok_or_else(|| Error::InvalidConfig("pyramid has no 100% level".into()))?;

        let active = pyramid.image_at(zoom_index).clone();
        let fog = FogLayer::create(active.width(), active.height());
        let state = ViewState {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom_index,
            brush_radius: config.brush_radius,
            rotation: Rotation::None,
            reveal_held: false,
            hide_held: false,
            legend_visible: config.legend_visible,
            running: true,
        };
        let (w, h) = surface_size;
        Ok(Self {
            config,
            pyramid,
            active,
            fog,
            state,
            surface: FrameBuffer::new(w.max(1), h.max(1)),
            pointer: None,
        })
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fog(&self) -> &FogLayer {
        &self.fog
    }

    pub fn active_image(&self) -> &RgbaImage {
        &self.active
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.pyramid.zoom_at(self.state.zoom_index)
    }

    pub fn surface(&self) -> &FrameBuffer {
        &self.surface
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// One full tick: apply input, then composite. Returns the frame to present.
    pub fn frame(&mut self, input: &FrameInput) -> &FrameBuffer {
        self.update(input);
        self.composite()
    }

    /// Steps that mutate state, in order: discrete events, held-key panning, brush.
    pub fn update(&mut self, input: &FrameInput) {
        for &event in &input.events {
            self.handle_event(event);
        }
        self.apply_pan(input.held);
        self.pointer = input.pointer;
        if let Some((px, py)) = input.pointer {
            self.apply_brush(px, py);
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::ButtonDown(PointerButton::Reveal) => self.state.reveal_held = true,
            InputEvent::ButtonUp(PointerButton::Reveal) => self.state.reveal_held = false,
            InputEvent::ButtonDown(PointerButton::Hide) => self.state.hide_held = true,
            InputEvent::ButtonUp(PointerButton::Hide) => self.state.hide_held = false,
            InputEvent::Scroll { direction, modifier: true } => self.adjust_brush(direction),
            InputEvent::Scroll { direction: ScrollDirection::Up, modifier: false } => {
                self.zoom_in();
            }
            InputEvent::Scroll { direction: ScrollDirection::Down, modifier: false } => {
                self.zoom_out();
            }
            InputEvent::Rotate => self.apply_rotation(),
            InputEvent::ToggleLegend => {
                self.state.legend_visible = !self.state.legend_visible;
                debug!(visible = self.state.legend_visible, "legend toggled");
            }
            InputEvent::Resized { width, height } => self.resize_surface(width, height),
            InputEvent::Quit => {
                info!("quit requested");
                self.state.running = false;
            }
        }
    }

    /// Step one level up the ladder. Returns false at the top.
    pub fn zoom_in(&mut self) -> bool {
        let next = self.state.zoom_index + 1;
        if next >= self.pyramid.len() {
            info!(zoom = self.zoom().percent(), "already at maximum zoom");
            return false;
        }
        self.apply_zoom(next);
        true
    }

    /// Step one level down the ladder. Returns false at the bottom.
    pub fn zoom_out(&mut self) -> bool {
        let Some(next) = self.state.zoom_index.checked_sub(1) else {
            info!(zoom = self.zoom().percent(), "already at minimum zoom");
            return false;
        };
        self.apply_zoom(next);
        true
    }

    /// Switch the base image to ladder position `index`, then fit the fog to it.
    /// The switch must come first: the fog is resized against the new image.
    pub fn apply_zoom(&mut self, index: usize) {
        self.state.zoom_index = index;
        self.active = self.state.rotation.apply(self.pyramid.image_at(index));
        let (w, h) = self.active.dimensions();
        self.fog.resize(w, h);
        info!(zoom = self.zoom().percent(), width = w, height = h, "zoom changed");
    }

    /// Turn the base image and the fog a quarter clockwise, together.
    pub fn apply_rotation(&mut self) {
        self.active = image::imageops::rotate90(&self.active);
        self.fog.rotate90();
        self.state.rotation = self.state.rotation.next();
        info!(degrees = self.state.rotation.degrees(), "view rotated");
    }

    pub fn adjust_brush(&mut self, direction: ScrollDirection) {
        let c = &self.config;
        let r = self.state.brush_radius;
        let next = match direction {
            ScrollDirection::Up => r.saturating_add(c.brush_radius_increment).min(c.max_brush_radius),
            ScrollDirection::Down => r.saturating_sub(c.brush_radius_increment).max(c.min_brush_radius),
        };
        if next == r {
            info!(radius = r, "brush radius at its limit");
            return;
        }
        self.state.brush_radius = next;
        info!(radius = next, "brush radius changed");
    }

    /// Continuous pan from the held-key snapshot. Diagonals add up.
    pub fn apply_pan(&mut self, held: HeldKeys) {
        let step = self.config.pan_per_frame();
        if held.left {
            self.state.pan_x -= step;
        }
        if held.right {
            self.state.pan_x += step;
        }
        if held.up {
            self.state.pan_y -= step;
        }
        if held.down {
            self.state.pan_y += step;
        }
    }

    /// Paint at the pointer while a brush button is held.
    /// Screen to image space is just the pan offset removed.
    pub fn apply_brush(&mut self, pointer_x: f32, pointer_y: f32) {
        if !self.state.reveal_held && !self.state.hide_held {
            return;
        }
        let (ix, iy) = self.screen_to_image(pointer_x, pointer_y);
        let radius = self.state.brush_radius;
        if self.state.reveal_held {
            self.fog.paint(ix, iy, radius, true);
        }
        if self.state.hide_held {
            self.fog.paint(ix, iy, radius, false);
        }
    }

    pub fn screen_to_image(&self, x: f32, y: f32) -> (f64, f64) {
        (f64::from(x) - self.state.pan_x, f64::from(y) - self.state.pan_y)
    }

    fn resize_surface(&mut self, width: usize, height: usize) {
        let (w, h) = (width.max(1), height.max(1));
        if (w, h) == (self.surface.width, self.surface.height) {
            return;
        }
        self.surface.resize(w, h);
        info!(width = w, height = h, "presentation surface resized");
    }

    /// Background, then map and fog at the pan offset, then the brush outline
    /// and the legend in screen space.
    pub fn composite(&mut self) -> &FrameBuffer {
        let bg = self.config.background_color;
        let fog_color = self.config.fog_color;
        self.surface.clear(bg);

        let ox = self.state.pan_x.floor() as i64;
        let oy = self.state.pan_y.floor() as i64;
        let img_w = i64::from(self.active.width());
        let img_h = i64::from(self.active.height());
        let sw = self.surface.width as i64;
        let sh = self.surface.height as i64;

        // Visible part of the image in surface coordinates
        let x_start = ox.max(0);
        let x_end = (ox + img_w).min(sw);
        let y_start = oy.max(0);
        let y_end = (oy + img_h).min(sh);

        if x_start < x_end && y_start < y_end {
            let raw = self.active.as_raw();
            let fog = self.fog.as_raw();
            let stride = img_w as usize;
            for sy in y_start..y_end {
                let iy = (sy - oy) as usize;
                let row = sy as usize * self.surface.width;
                for sx in x_start..x_end {
                    let i = iy * stride + (sx - ox) as usize;
                    let p = &raw[i * 4..i * 4 + 4];
                    let base = blend(bg, pack_rgb(p[0], p[1], p[2]), p[3]);
                    self.surface.pixels[row + sx as usize] = blend(base, fog_color, fog[i]);
                }
            }
        }

        if self.config.show_brush_outline {
            if let Some((px, py)) = self.pointer {
                draw_circle(
                    &mut self.surface,
                    px.floor() as i32,
                    py.floor() as i32,
                    self.state.brush_radius as i32,
                    BRUSH_OUTLINE_COLOR,
                );
            }
        }

        if self.state.legend_visible {
            let scale = (self.config.legend_font_size / 7).max(1) as i32;
            draw_text_block(
                &mut self.surface,
                LEGEND_ANCHOR.0,
                LEGEND_ANCHOR.1,
                &self.config.legend_lines,
                scale,
                LEGEND_COLOR,
            );
        }

        &self.surface
    }
}

/// Mix `src` over `dst` with coverage `alpha` (0..=255), per channel.
#[inline]
fn blend(dst: u32, src: u32, alpha: u8) -> u32 {
    match alpha {
        0 => dst,
        255 => src,
        a => {
            let a = u32::from(a);
            let inv = 255 - a;
            let mix = |shift: u32| {
                let d = (dst >> shift) & 0xFF;
                let s = (src >> shift) & 0xFF;
                ((s * a + d * inv + 127) / 255) << shift
            };
            mix(16) | mix(8) | mix(0)
        }
    }
}
