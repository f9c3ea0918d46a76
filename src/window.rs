// The host window (minifb).
// minifb only exposes polled state, so this adapter diffs it against the
// previous frame to produce the discrete event queue, and samples the arrow
// keys into the held-key snapshot.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::config::ModifierKey;
use crate::error::{Error, Result};
use crate::input::{FrameInput, HeldKeys, InputEvent, PointerButton, ScrollDirection};
use crate::types::FrameBuffer;

const ROTATE_KEY: Key = Key::R;
const LEGEND_KEY: Key = Key::H;

pub struct MapWindow {
    window: Window, // the on-screen window you see
    modifier: ModifierKey,
    left_was_down: bool,
    right_was_down: bool,
    last_size: (usize, usize),
}

impl MapWindow {
    /// Create a resizable window ticking at `framerate`.
    pub fn new(title: &str, width: usize, height: usize, framerate: u32, modifier: ModifierKey) -> Result<Self> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(framerate as usize);
        Ok(Self {
            window,
            modifier,
            left_was_down: false,
            right_was_down: false,
            last_size: (width, height),
        })
    }

    /// Collect this frame's input from the window.
    pub fn poll(&mut self) -> FrameInput {
        let mut events = Vec::new();

        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            events.push(InputEvent::Quit);
        }

        let size = self.window.get_size();
        if size != self.last_size {
            self.last_size = size;
            events.push(InputEvent::Resized { width: size.0, height: size.1 });
        }

        let left = self.window.get_mouse_down(MouseButton::Left);
        if let Some(event) = edge(self.left_was_down, left, PointerButton::Reveal) {
            events.push(event);
        }
        self.left_was_down = left;

        let right = self.window.get_mouse_down(MouseButton::Right);
        if let Some(event) = edge(self.right_was_down, right, PointerButton::Hide) {
            events.push(event);
        }
        self.right_was_down = right;

        if let Some((_, dy)) = self.window.get_scroll_wheel() {
            let direction = if dy > 0.0 {
                Some(ScrollDirection::Up)
            } else if dy < 0.0 {
                Some(ScrollDirection::Down)
            } else {
                None
            };
            if let Some(direction) = direction {
                events.push(InputEvent::Scroll { direction, modifier: self.modifier_down() });
            }
        }

        if self.window.is_key_pressed(ROTATE_KEY, KeyRepeat::No) {
            events.push(InputEvent::Rotate);
        }
        if self.window.is_key_pressed(LEGEND_KEY, KeyRepeat::No) {
            events.push(InputEvent::ToggleLegend);
        }

        let held = HeldKeys {
            left: self.window.is_key_down(Key::Left),
            right: self.window.is_key_down(Key::Right),
            up: self.window.is_key_down(Key::Up),
            down: self.window.is_key_down(Key::Down),
        };

        FrameInput {
            events,
            held,
            pointer: self.window.get_mouse_pos(MouseMode::Discard),
        }
    }

    /// Push the pixels for this frame to the screen. Also waits for the next tick.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    fn modifier_down(&self) -> bool {
        let (a, b) = match self.modifier {
            ModifierKey::Ctrl => (Key::LeftCtrl, Key::RightCtrl),
            ModifierKey::Shift => (Key::LeftShift, Key::RightShift),
            ModifierKey::Alt => (Key::LeftAlt, Key::RightAlt),
        };
        self.window.is_key_down(a) || self.window.is_key_down(b)
    }
}

/// Turn a button's previous/current level into a down or up event.
fn edge(was_down: bool, is_down: bool, button: PointerButton) -> Option<InputEvent> {
    match (was_down, is_down) {
        (false, true) => Some(InputEvent::ButtonDown(button)),
        (true, false) => Some(InputEvent::ButtonUp(button)),
        _ => None,
    }
}
