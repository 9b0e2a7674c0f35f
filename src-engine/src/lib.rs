//! framescan Capture Engine
//!
//! Owns the camera hardware handle, drives a background decode worker
//! against camera frames, reacts to surface, ambient-light, and decode
//! events, and enforces a strict session lifecycle so hardware is never
//! leaked, double-opened, or touched after release.
//!
//! The pixel-level decode algorithm, the camera driver, the ambient
//! light sensor, and the viewfinder rendering are all consumed through
//! contracts: [`Decoder`], [`FrameSource`], [`LightMonitor`], and
//! [`ViewfinderSink`]. A host supplies implementations and a lifecycle
//! adapter translating its native show/hide and surface callbacks into
//! [`SessionHandle`] calls.

pub mod decoder;
pub mod error;
pub mod frame;
pub mod light;
pub mod session;
pub mod source;
pub mod viewfinder;

mod worker;

pub use decoder::{DecodeOutcome, Decoder};
pub use error::SourceError;
pub use frame::Frame;
pub use light::{LightEvents, LightLevel, LightMonitor, NullLightMonitor};
pub use session::{CaptureSession, SessionEvent, SessionHandle, SessionState};
pub use source::{FrameReply, FrameSource, SurfaceHandle};
pub use viewfinder::{NullViewfinder, ViewfinderSink, DEFAULT_STATUS_MESSAGE};
