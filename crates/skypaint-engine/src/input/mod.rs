//! Input subsystem.
//!
//! The public types are platform-agnostic. `platform::winit` translates
//! window events into [`InputEvent`]s; [`InputState::apply_event`] folds them
//! into held state plus per-frame [`InputFrame`] deltas.

mod frame;
pub mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
};
