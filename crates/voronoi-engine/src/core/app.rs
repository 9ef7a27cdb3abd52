use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once per rendered frame.
    ///
    /// Input received since the previous frame is available in
    /// `ctx.input_frame.events`, in arrival order.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called exactly once when the event loop shuts down, before the window
    /// and GPU context are destroyed.
    fn on_exit(&mut self) {}
}
