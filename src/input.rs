// Two input channels, consumed once per frame:
// a queue of discrete events and a snapshot of the keys currently held.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Reveal, // primary
    Hide,   // secondary
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    ButtonDown(PointerButton),
    ButtonUp(PointerButton),
    /// `modifier` is true while the configured brush modifier is held.
    Scroll { direction: ScrollDirection, modifier: bool },
    Rotate,
    ToggleLegend,
    Resized { width: usize, height: usize },
    Quit,
}

/// Pan directions held down this frame. Each is independent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Everything the viewport needs from the host for one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
    /// Pointer in window pixels; None when outside the window.
    pub pointer: Option<(f32, f32)>,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self { events: events.into_iter().collect(), ..Self::default() }
    }
}
