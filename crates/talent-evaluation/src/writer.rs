//! Background telemetry writer.
//!
//! The search path only enqueues; a dedicated thread evaluates completed
//! searches and persists them. Store failures are logged and counted,
//! never returned.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use talent_core::models::{CompletedSearch, QueryId, UserFeedback};
use talent_core::traits::ITelemetryStore;
use tracing::{debug, warn};

use crate::evaluator::Evaluator;
use crate::tracing_setup::events;

enum TelemetryCommand {
    Record(Box<CompletedSearch>),
    Feedback(QueryId, UserFeedback),
    Flush(Sender<()>),
}

/// Counters reported when the writer shuts down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub recorded: usize,
    pub feedback: usize,
    pub dropped: usize,
}

pub struct TelemetryWriter {
    sender: Option<Sender<TelemetryCommand>>,
    handle: Option<JoinHandle<WriterStats>>,
}

impl TelemetryWriter {
    /// Spawn the writer thread.
    pub fn spawn(store: Arc<dyn ITelemetryStore>, evaluator: Evaluator) -> Self {
        let (sender, receiver) = mpsc::channel::<TelemetryCommand>();
        let handle = thread::Builder::new()
            .name("talent-telemetry".to_string())
            .spawn(move || Self::writer_thread(store, evaluator, receiver));

        match handle {
            Ok(handle) => Self {
                sender: Some(sender),
                handle: Some(handle),
            },
            Err(e) => {
                warn!(error = %e, "telemetry writer thread failed to start, telemetry disabled");
                Self {
                    sender: None,
                    handle: None,
                }
            }
        }
    }

    /// Enqueue a completed search. Returns immediately.
    pub fn record(&self, search: CompletedSearch) {
        let query_id = search.query_id.clone();
        self.send(TelemetryCommand::Record(Box::new(search)), &query_id);
    }

    /// Enqueue feedback for a query. Returns immediately.
    pub fn feedback(&self, query_id: QueryId, feedback: UserFeedback) {
        let id = query_id.clone();
        self.send(TelemetryCommand::Feedback(query_id, feedback), &id);
    }

    /// Block until everything enqueued so far has been processed.
    pub fn flush(&self) {
        let Some(sender) = &self.sender else {
            return;
        };
        let (ack, done) = mpsc::channel();
        if sender.send(TelemetryCommand::Flush(ack)).is_ok() {
            let _ = done.recv();
        }
    }

    /// Close the queue, drain it, and return the counters.
    pub fn finish(mut self) -> WriterStats {
        self.shutdown()
    }

    fn send(&self, command: TelemetryCommand, query_id: &QueryId) {
        let delivered = self
            .sender
            .as_ref()
            .is_some_and(|s| s.send(command).is_ok());
        if !delivered {
            events::telemetry_dropped(query_id, "telemetry writer is not running");
        }
    }

    fn shutdown(&mut self) -> WriterStats {
        // Dropping the sender ends the receive loop.
        drop(self.sender.take());
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(stats)) => stats,
            Some(Err(_)) => {
                warn!("telemetry writer thread panicked");
                WriterStats::default()
            }
            None => WriterStats::default(),
        }
    }

    fn writer_thread(
        store: Arc<dyn ITelemetryStore>,
        evaluator: Evaluator,
        receiver: Receiver<TelemetryCommand>,
    ) -> WriterStats {
        let mut stats = WriterStats::default();

        for command in receiver {
            match command {
                TelemetryCommand::Record(search) => {
                    for d in &search.degradations {
                        events::degradation_triggered(&d.component, &d.failure, &d.fallback);
                    }
                    let metrics = evaluator.to_metrics(&search);
                    match store.append(&metrics) {
                        Ok(()) => {
                            stats.recorded += 1;
                            events::search_completed(
                                &metrics.query_id,
                                metrics.query_type,
                                metrics.method,
                                metrics.result_count,
                                metrics.response_time_ms,
                            );
                        }
                        Err(e) => {
                            stats.dropped += 1;
                            events::telemetry_dropped(&metrics.query_id, &e.to_string());
                        }
                    }
                }
                TelemetryCommand::Feedback(query_id, feedback) => {
                    match store.attach_feedback(&query_id, &feedback) {
                        Ok(()) => {
                            stats.feedback += 1;
                            events::feedback_attached(&query_id, feedback.rating());
                        }
                        Err(e) => {
                            stats.dropped += 1;
                            events::telemetry_dropped(&query_id, &e.to_string());
                        }
                    }
                }
                TelemetryCommand::Flush(ack) => {
                    let _ = ack.send(());
                }
            }
        }

        debug!(
            recorded = stats.recorded,
            feedback = stats.feedback,
            dropped = stats.dropped,
            "telemetry writer stopped"
        );
        stats
    }
}

impl Drop for TelemetryWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
