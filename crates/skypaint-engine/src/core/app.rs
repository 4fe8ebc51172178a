use winit::event::WindowEvent;

use super::ctx::FrameCtx;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Implemented by the application driven by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Raw window events, delivered before the runtime handles them.
    ///
    /// Input is also available, already translated, in the next frame's
    /// [`InputFrame`](crate::input::InputFrame).
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
