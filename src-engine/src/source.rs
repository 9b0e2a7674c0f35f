//! Frame source contract: the camera hardware abstraction the
//! coordinator drives.

use tokio::sync::mpsc;

use crate::error::SourceError;
use crate::frame::Frame;
use crate::session::SessionMessage;

/// Opaque handle to the display surface the camera preview renders to.
/// The host lifecycle adapter produces one from its native surface
/// object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceHandle {
    raw: isize,
}

impl SurfaceHandle {
    pub fn from_raw(raw: isize) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> isize {
        self.raw
    }
}

/// One-shot reply channel for a single frame request.
///
/// The reply is stamped with the session token current at request time;
/// a delivery that arrives after the session was paused, stopped, or
/// restarted is discarded by the coordinator.
pub struct FrameReply {
    tx: mpsc::UnboundedSender<SessionMessage>,
    token: u64,
}

impl FrameReply {
    pub(crate) fn new(tx: mpsc::UnboundedSender<SessionMessage>, token: u64) -> Self {
        Self { tx, token }
    }

    /// Deliver one captured frame to the coordinator. Never blocks.
    pub fn deliver(self, frame: Frame) {
        let _ = self.tx.send(SessionMessage::Frame {
            token: self.token,
            frame,
        });
    }
}

/// Camera hardware abstraction.
///
/// The coordinator guarantees `open` is never called while the source
/// is already open and `request_frame` is only called between a
/// successful `open` and the matching `close`. Implementations own the
/// capture thread; frames are delivered asynchronously through the
/// [`FrameReply`] handed to `request_frame`.
pub trait FrameSource: Send {
    fn open(&mut self, surface: &SurfaceHandle) -> Result<(), SourceError>;

    fn close(&mut self);

    fn is_open(&self) -> bool;

    /// Request a single frame, delivered through `reply` when captured.
    fn request_frame(&mut self, reply: FrameReply);

    /// Turn the torch (continuous flash) on or off.
    fn set_torch(&mut self, on: bool);

    /// Best-effort preview size hint. Sources that cannot honor it
    /// ignore it.
    fn set_frame_size(&mut self, _width: u32, _height: u32) {}
}
