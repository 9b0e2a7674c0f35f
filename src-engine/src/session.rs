//! Capture-session coordinator.
//!
//! Owns the lifecycle state machine, drives the frame/decode loop,
//! serializes all hardware access, applies the torch policy, and
//! delivers the terminal result.
//!
//! The coordinator is logically single-threaded: one tokio task owns
//! every piece of mutable session state and processes lifecycle calls
//! and collaborator replies from a single ordered inbox, so no locks
//! exist inside it. Cancellation is a session token bump applied
//! synchronously inside the transition that cancels; any queued message
//! stamped with an older token is discarded when it is processed.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::decoder::{DecodeOutcome, Decoder};
use crate::frame::Frame;
use crate::light::{LightEvents, LightLevel, LightMonitor};
use crate::source::{FrameReply, FrameSource, SurfaceHandle};
use crate::viewfinder::{ViewfinderSink, DEFAULT_STATUS_MESSAGE};
use crate::worker::DecodeWorker;
use framescan_types::{Extras, ScanRequest, ScanResult};

/// Lifecycle state of a capture session.
///
/// The frame source is open exactly while the state is `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session active.
    Idle,
    /// `start()` received, waiting for a display surface.
    AwaitingSurface,
    /// Hardware open, frame/decode loop running.
    Running,
    /// Host hidden or surface lost; hardware released.
    Paused,
    /// Terminal: result delivered, or the session failed.
    Finished,
}

/// Events broadcast to session subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Lifecycle state changed.
    StateChanged(SessionState),
    /// The terminal decode, encoded as the caller-visible reply
    /// envelope. Emitted at most once per session.
    ResultReady(Extras),
    /// Opening the frame source failed. The session is over without a
    /// result; the failure is never retried.
    Fatal { reason: String },
}

/// Messages processed, strictly in order, by the coordinator task.
pub(crate) enum SessionMessage {
    Start { request: ScanRequest },
    Stop { done: oneshot::Sender<()> },
    SurfaceReady { surface: SurfaceHandle },
    SurfaceLost,
    SetTorch { on: bool },
    Reset,
    Shutdown { done: oneshot::Sender<()> },
    Frame { token: u64, frame: Frame },
    Decoded { token: u64, outcome: DecodeOutcome },
    Light { level: LightLevel },
    Deliver { token: u64 },
}

/// Entry point: spawns the coordinator task for one session.
pub struct CaptureSession;

impl CaptureSession {
    /// Spawn the coordinator and return a handle to it. Must be called
    /// inside a tokio runtime.
    pub fn spawn(
        source: Box<dyn FrameSource>,
        decoder: Arc<dyn Decoder>,
        light: Box<dyn LightMonitor>,
        viewfinder: Box<dyn ViewfinderSink>,
    ) -> SessionHandle {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(64);
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);

        let coordinator = Coordinator {
            state: SessionState::Idle,
            token: 0,
            request: ScanRequest::default(),
            surface: None,
            source,
            decoder,
            light,
            viewfinder,
            worker: None,
            manual_torch: None,
            pending_reply: None,
            inbox_tx: inbox_tx.clone(),
            events: events.clone(),
            state_tx,
        };
        tokio::spawn(coordinator.run(inbox_rx));

        SessionHandle {
            tx: inbox_tx,
            events,
            state: state_rx,
        }
    }
}

/// Handle to a running capture session. Cheap to clone.
///
/// The lifecycle methods never block, so they are safe to call from a
/// host UI thread; `stop()` and `close()` are the only awaiting calls.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionMessage>,
    events: broadcast::Sender<SessionEvent>,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    /// Begin a session with a freshly captured request. Enters
    /// `AwaitingSurface`, or `Running` immediately when a surface is
    /// already available. Clears any manual torch override from a
    /// previous session.
    pub fn start(&self, request: ScanRequest) {
        let _ = self.tx.send(SessionMessage::Start { request });
    }

    /// Suspend scanning (host hidden). Resolves only after the decode
    /// worker has been joined, the frame source closed, and the light
    /// monitor stopped, so a subsequent `start()` can reopen hardware
    /// without a race. Idempotent in `Paused` and `Finished`.
    pub async fn stop(&self) {
        let (done, ack) = oneshot::channel();
        if self.tx.send(SessionMessage::Stop { done }).is_ok() {
            let _ = ack.await;
        }
    }

    /// Report that the display surface became available.
    pub fn surface_ready(&self, surface: SurfaceHandle) {
        let _ = self.tx.send(SessionMessage::SurfaceReady { surface });
    }

    /// Report that the display surface was destroyed.
    pub fn surface_lost(&self) {
        let _ = self.tx.send(SessionMessage::SurfaceLost);
    }

    /// Manually force the torch on or off. Sticky for the rest of the
    /// session: ambient-light events will not contradict it.
    pub fn set_torch(&self, on: bool) {
        let _ = self.tx.send(SessionMessage::SetTorch { on });
    }

    /// Return a `Finished` session to `Idle` so the coordinator can be
    /// reused for a new session.
    pub fn reset(&self) {
        let _ = self.tx.send(SessionMessage::Reset);
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Tear the session down (as `stop()`) and terminate the
    /// coordinator task.
    pub async fn close(&self) {
        let (done, ack) = oneshot::channel();
        if self.tx.send(SessionMessage::Shutdown { done }).is_ok() {
            let _ = ack.await;
        }
    }
}

struct Coordinator {
    state: SessionState,
    /// Monotonically increasing session token. Bumped on every entry to
    /// `Running` and on every cancellation; replies stamped with an
    /// older token are discarded.
    token: u64,
    /// The request frozen for the current session.
    request: ScanRequest,
    surface: Option<SurfaceHandle>,
    source: Box<dyn FrameSource>,
    decoder: Arc<dyn Decoder>,
    light: Box<dyn LightMonitor>,
    viewfinder: Box<dyn ViewfinderSink>,
    worker: Option<DecodeWorker>,
    /// Sticky manual torch override; cleared on the next `start()`.
    manual_torch: Option<bool>,
    /// Reply envelope held back for a delayed delivery.
    pending_reply: Option<Extras>,
    inbox_tx: mpsc::UnboundedSender<SessionMessage>,
    events: broadcast::Sender<SessionEvent>,
    state_tx: watch::Sender<SessionState>,
}

impl Coordinator {
    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<SessionMessage>) {
        while let Some(message) = inbox.recv().await {
            match message {
                SessionMessage::Start { request } => self.on_start(request),
                SessionMessage::Stop { done } => {
                    self.on_stop();
                    let _ = done.send(());
                }
                SessionMessage::SurfaceReady { surface } => self.on_surface_ready(surface),
                SessionMessage::SurfaceLost => self.on_surface_lost(),
                SessionMessage::SetTorch { on } => self.on_set_torch(on),
                SessionMessage::Reset => self.on_reset(),
                SessionMessage::Shutdown { done } => {
                    self.release_resources();
                    let _ = done.send(());
                    debug!("capture session coordinator shut down");
                    return;
                }
                SessionMessage::Frame { token, frame } => self.on_frame(token, frame),
                SessionMessage::Decoded { token, outcome } => self.on_decoded(token, outcome),
                SessionMessage::Light { level } => self.on_light(level),
                SessionMessage::Deliver { token } => self.on_deliver(token),
            }
        }
        // Every handle is gone; release hardware before the task ends.
        self.release_resources();
        debug!("capture session coordinator exiting");
    }

    fn on_start(&mut self, request: ScanRequest) {
        match self.state {
            SessionState::Idle | SessionState::Paused => {
                info!("capture session start requested");
                self.request = request;
                self.manual_torch = None;
                if self.surface.is_some() {
                    self.enter_running();
                } else {
                    self.set_state(SessionState::AwaitingSurface);
                }
            }
            SessionState::AwaitingSurface | SessionState::Running => {
                warn!("start() while session already active; ignored");
            }
            SessionState::Finished => {
                warn!("start() on a finished session; reset() it first");
            }
        }
    }

    fn on_stop(&mut self) {
        match self.state {
            SessionState::Running | SessionState::AwaitingSurface => {
                info!("capture session stop requested");
                self.suspend();
            }
            SessionState::Idle | SessionState::Paused | SessionState::Finished => {
                debug!(state = ?self.state, "stop() with nothing to release");
            }
        }
    }

    fn on_surface_ready(&mut self, surface: SurfaceHandle) {
        self.surface = Some(surface);
        if self.state == SessionState::AwaitingSurface {
            self.enter_running();
        }
    }

    fn on_surface_lost(&mut self) {
        self.surface = None;
        if self.state == SessionState::Running {
            info!("display surface lost; suspending session");
            self.suspend();
        }
    }

    fn on_set_torch(&mut self, on: bool) {
        self.manual_torch = Some(on);
        if self.source.is_open() {
            self.source.set_torch(on);
        }
    }

    fn on_light(&mut self, level: LightLevel) {
        if !self.source.is_open() {
            return;
        }
        match level {
            LightLevel::Dark => {
                if self.manual_torch != Some(false) {
                    self.source.set_torch(true);
                } else {
                    debug!("dark transition ignored: torch manually forced off");
                }
            }
            LightLevel::Bright => {
                if self.manual_torch != Some(true) {
                    self.source.set_torch(false);
                } else {
                    debug!("bright transition ignored: torch manually forced on");
                }
            }
        }
    }

    fn on_reset(&mut self) {
        if self.state != SessionState::Finished {
            warn!(state = ?self.state, "reset() outside Finished; ignored");
            return;
        }
        self.token += 1;
        self.pending_reply = None;
        self.set_state(SessionState::Idle);
    }

    fn on_frame(&mut self, token: u64, frame: Frame) {
        if token != self.token || self.state != SessionState::Running {
            debug!("discarding frame from a cancelled session");
            return;
        }
        self.viewfinder.draw_frame(&frame);
        if let Some(worker) = &self.worker {
            worker.submit(frame, token);
        }
    }

    fn on_decoded(&mut self, token: u64, outcome: DecodeOutcome) {
        if token != self.token || self.state != SessionState::Running {
            debug!("discarding stale decode outcome");
            return;
        }
        match outcome {
            DecodeOutcome::NotFound => self.request_next_frame(),
            DecodeOutcome::Found(result) => self.finish(result),
        }
    }

    fn on_deliver(&mut self, token: u64) {
        if token != self.token || self.state != SessionState::Finished {
            debug!("discarding stale delivery timer");
            return;
        }
        if let Some(reply) = self.pending_reply.take() {
            self.emit(SessionEvent::ResultReady(reply));
        }
    }

    /// Enter `Running`: open the hardware, apply the requested frame
    /// size, start the light monitor and the decode worker, request the
    /// first frame. An open failure is fatal for the session.
    fn enter_running(&mut self) {
        let surface = match self.surface {
            Some(surface) => surface,
            None => {
                warn!("cannot enter Running without a surface");
                return;
            }
        };
        if self.source.is_open() {
            warn!("frame source already open on Running entry; late surface callback?");
            return;
        }

        self.token += 1;

        if let Err(err) = self.source.open(&surface) {
            warn!("failed to open frame source: {}", err);
            self.emit(SessionEvent::Fatal {
                reason: err.to_string(),
            });
            self.set_state(SessionState::Finished);
            return;
        }

        if let Some(size) = self.request.frame_size {
            self.source.set_frame_size(size.width, size.height);
        }

        let status = self
            .request
            .prompt_message
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS_MESSAGE.to_string());
        self.viewfinder.set_status(&status);

        self.light.start(LightEvents::new(self.inbox_tx.clone()));
        self.worker = Some(DecodeWorker::spawn(
            self.decoder.clone(),
            &self.request,
            self.inbox_tx.clone(),
        ));

        self.set_state(SessionState::Running);
        info!(
            formats = self.request.effective_formats().len(),
            "scan session running"
        );
        self.request_next_frame();
    }

    /// Enter `Paused`: cancel outstanding work, join the worker, close
    /// the hardware, stop the light monitor. Blocking here is the
    /// synchronous-shutdown contract `stop()` relies on.
    fn suspend(&mut self) {
        self.token += 1;
        if let Some(worker) = self.worker.take() {
            worker.stop();
        }
        if self.source.is_open() {
            self.source.close();
        }
        self.light.stop();
        self.pending_reply = None;
        self.set_state(SessionState::Paused);
    }

    /// Enter `Finished` with a decode: no further submissions, render
    /// the result, deliver now or after the display pause, release the
    /// hardware.
    fn finish(&mut self, result: ScanResult) {
        info!(format = result.format.name(), "scan decoded");

        if let Some(worker) = self.worker.take() {
            worker.stop();
        }

        self.viewfinder.draw_result(&result);
        let duration_ms = self.request.result_display_duration_ms;
        if duration_ms > 0 {
            self.viewfinder.set_status(&result.preview());
        }

        let reply = result.to_reply_extras();
        if duration_ms == 0 {
            self.emit(SessionEvent::ResultReady(reply));
        } else {
            self.pending_reply = Some(reply);
            let tx = self.inbox_tx.clone();
            let token = self.token;
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(duration_ms)).await;
                let _ = tx.send(SessionMessage::Deliver { token });
            });
        }

        self.source.close();
        self.light.stop();
        self.set_state(SessionState::Finished);
    }

    fn request_next_frame(&mut self) {
        let reply = FrameReply::new(self.inbox_tx.clone(), self.token);
        self.source.request_frame(reply);
    }

    /// Final teardown when the coordinator task ends.
    fn release_resources(&mut self) {
        self.token += 1;
        if let Some(worker) = self.worker.take() {
            worker.stop();
        }
        if self.source.is_open() {
            self.source.close();
        }
        self.light.stop();
    }

    fn set_state(&mut self, state: SessionState) {
        debug!(from = ?self.state, to = ?state, "session state transition");
        self.state = state;
        let _ = self.state_tx.send(state);
        self.emit(SessionEvent::StateChanged(state));
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
