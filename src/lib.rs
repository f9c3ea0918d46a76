//! Fog of war for tabletop maps.
//!
//! A map image is shown under an opaque fog layer that the user reveals or
//! hides with a circular brush, while panning, zooming through a fixed ladder
//! of pre-scaled copies, and rotating in quarter turns.

pub mod config;
pub mod draw;
pub mod error;
pub mod fog;
pub mod input;
pub mod pyramid;
pub mod types;
pub mod viewport;
pub mod window;

pub use config::{Config, ModifierKey};
pub use error::{Error, ImageLoadError, Result};
pub use fog::FogLayer;
pub use input::{FrameInput, HeldKeys, InputEvent, PointerButton, ScrollDirection};
pub use pyramid::{ImagePyramid, SourceImage};
pub use types::{FrameBuffer, Rotation, ZoomLevel};
pub use viewport::{ViewState, Viewport};
