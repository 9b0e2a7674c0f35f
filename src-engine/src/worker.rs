//! Background decode worker: one dedicated thread per session, one
//! outstanding submission at a time.
//!
//! The worker never sees lifecycle state. It decodes whatever it is
//! handed and reports the outcome, stamped with the submission's
//! session token, back into the coordinator inbox; the coordinator is
//! the one that decides whether the reply is still current.

use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc;
use tracing::debug;

use crate::decoder::Decoder;
use crate::frame::Frame;
use crate::session::SessionMessage;
use framescan_types::ScanRequest;

enum Job {
    Decode { frame: Frame, token: u64 },
    Quit,
}

pub(crate) struct DecodeWorker {
    jobs: std_mpsc::Sender<Job>,
    handle: Option<thread::JoinHandle<()>>,
}

impl DecodeWorker {
    /// Spawn the worker thread for one session. The effective format
    /// set and hints are frozen here from the session's request.
    pub(crate) fn spawn(
        decoder: Arc<dyn Decoder>,
        request: &ScanRequest,
        out: mpsc::UnboundedSender<SessionMessage>,
    ) -> Self {
        let (jobs, job_rx) = std_mpsc::channel();
        let formats = request.effective_formats();
        let hints = request.hints.clone();

        let handle = thread::spawn(move || {
            while let Ok(job) = job_rx.recv() {
                match job {
                    Job::Decode { frame, token } => {
                        let outcome = decoder.decode(&frame, &formats, &hints);
                        if out
                            .send(SessionMessage::Decoded { token, outcome })
                            .is_err()
                        {
                            break;
                        }
                    }
                    Job::Quit => break,
                }
            }
            debug!("decode worker exiting");
        });

        Self {
            jobs,
            handle: Some(handle),
        }
    }

    /// Submit one frame. The coordinator never submits a second frame
    /// until the previous outcome (or its cancellation) was observed.
    pub(crate) fn submit(&self, frame: Frame, token: u64) {
        let _ = self.jobs.send(Job::Decode { frame, token });
    }

    /// Stop the worker and join its thread. Blocks until any in-flight
    /// decode attempt finishes; its outcome still reaches the inbox and
    /// is discarded there as stale.
    pub(crate) fn stop(mut self) {
        let _ = self.jobs.send(Job::Quit);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DecodeOutcome;
    use framescan_types::{BarcodeFormat, DecodeHints, ScanResult};

    struct FixedDecoder;

    impl Decoder for FixedDecoder {
        fn decode(
            &self,
            _frame: &Frame,
            formats: &[BarcodeFormat],
            _hints: &DecodeHints,
        ) -> DecodeOutcome {
            DecodeOutcome::Found(ScanResult::new("FIXED", formats[0]))
        }
    }

    #[test]
    fn test_worker_reports_outcome_with_token() {
        let (out, mut inbox) = mpsc::unbounded_channel();
        let request = ScanRequest {
            formats: vec![BarcodeFormat::Code128],
            ..Default::default()
        };
        let worker = DecodeWorker::spawn(Arc::new(FixedDecoder), &request, out);

        worker.submit(Frame::new(4, 4, vec![0; 16]), 7);

        match inbox.blocking_recv() {
            Some(SessionMessage::Decoded { token, outcome }) => {
                assert_eq!(token, 7);
                match outcome {
                    DecodeOutcome::Found(result) => {
                        assert_eq!(result.contents, "FIXED");
                        assert_eq!(result.format, BarcodeFormat::Code128);
                    }
                    DecodeOutcome::NotFound => panic!("expected a found outcome"),
                }
            }
            other => panic!("unexpected message: {:?}", other.is_some()),
        }

        worker.stop();
    }

    #[test]
    fn test_worker_stops_cleanly_without_submissions() {
        let (out, _inbox) = mpsc::unbounded_channel();
        let worker = DecodeWorker::spawn(Arc::new(FixedDecoder), &ScanRequest::default(), out);
        worker.stop();
    }
}
