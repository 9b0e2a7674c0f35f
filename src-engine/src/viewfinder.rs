//! Viewfinder sink: where the session renders preview frames, status
//! text, and the terminal decode for user feedback.

use framescan_types::ScanResult;

use crate::frame::Frame;

/// Status line shown while scanning when the request carries no prompt.
pub const DEFAULT_STATUS_MESSAGE: &str =
    "Place a barcode inside the viewfinder rectangle to scan it";

/// Rendering sink supplied by the host UI.
///
/// Called from the coordinator's execution context; implementations
/// must hand off to their own rendering thread if they need one.
pub trait ViewfinderSink: Send {
    /// Render a preview frame.
    fn draw_frame(&mut self, frame: &Frame);

    /// Overlay the successful decode. Result points are in detection
    /// space; multiply by the frame's scale factor for display space.
    fn draw_result(&mut self, result: &ScanResult);

    /// Replace the status line.
    fn set_status(&mut self, text: &str);
}

/// Sink that renders nothing, for headless hosts and tests.
pub struct NullViewfinder;

impl ViewfinderSink for NullViewfinder {
    fn draw_frame(&mut self, _frame: &Frame) {}

    fn draw_result(&mut self, _result: &ScanResult) {}

    fn set_status(&mut self, _text: &str) {}
}
