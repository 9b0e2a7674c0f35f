//! Ambient light monitor contract.
//!
//! A monitor watches the environment while the camera is open and
//! reports dark/bright transitions; the coordinator translates them
//! into torch commands, subject to the session's sticky manual
//! override.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::session::SessionMessage;

/// Ambient light transition reported by a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightLevel {
    Dark,
    Bright,
}

/// Handle a light monitor uses to report transitions to the
/// coordinator. Cheap to clone; never blocks.
#[derive(Clone)]
pub struct LightEvents {
    tx: mpsc::UnboundedSender<SessionMessage>,
}

impl LightEvents {
    pub(crate) fn new(tx: mpsc::UnboundedSender<SessionMessage>) -> Self {
        Self { tx }
    }

    pub fn notify(&self, level: LightLevel) {
        let _ = self.tx.send(SessionMessage::Light { level });
    }
}

/// Ambient light sensor abstraction.
///
/// Started whenever the frame source opens and stopped whenever it
/// closes. A `start` after `stop` must begin reporting again.
pub trait LightMonitor: Send {
    fn start(&mut self, events: LightEvents);

    fn stop(&mut self);
}

/// Monitor that never reports a transition, for hosts without a light
/// sensor or requests without front-light auto mode.
pub struct NullLightMonitor;

impl LightMonitor for NullLightMonitor {
    fn start(&mut self, _events: LightEvents) {}

    fn stop(&mut self) {}
}
