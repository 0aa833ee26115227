#[cfg(test)]
#[path = "interview_test.rs"]
mod tests;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::TopicTracker;
use crate::domain::models::ClassifierBox;
use crate::domain::models::Message;
use crate::domain::models::ProgressNote;
use crate::domain::models::ProgressSnapshot;
use crate::domain::models::Role;
use crate::domain::models::StreamEvent;
use crate::domain::models::StreamSignal;
use crate::domain::models::TopicRubric;
use crate::domain::models::TransportBox;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Streaming,
    Error,
}

/// The mutable, uncommitted accumulation of an in-flight assistant
/// reply. Never part of history; discarded whole on cancel or error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamingBuffer {
    pub partial_content: String,
    pub progress_note: Option<ProgressNote>,
}

struct ActiveStream {
    id: u64,
    cancel: CancellationToken,
    worker: JoinHandle<()>,
}

/// Single authoritative owner of one conversation's state. All mutation
/// goes through the entry points below; the view reads snapshots through
/// the accessors. At most one request is in flight at a time, enforced
/// here rather than by a lock since the session itself is the
/// serialization point.
pub struct InterviewSession {
    session_id: String,
    transport: TransportBox,
    classifier: ClassifierBox,
    rubric: TopicRubric,
    history: Vec<Message>,
    buffer: Option<StreamingBuffer>,
    phase: Phase,
    last_error: Option<String>,
    progress: ProgressSnapshot,
    stream_seq: u64,
    active: Option<ActiveStream>,
    signals_tx: mpsc::UnboundedSender<StreamSignal>,
}

impl InterviewSession {
    pub async fn new(
        session_id: &str,
        transport: TransportBox,
        classifier: ClassifierBox,
        rubric: TopicRubric,
        signals_tx: mpsc::UnboundedSender<StreamSignal>,
    ) -> InterviewSession {
        return InterviewSession::resume(session_id, transport, classifier, rubric, vec![], signals_tx)
            .await;
    }

    /// Binds a previously persisted history to a fresh session. Progress
    /// is recomputed up front so a resumed interview starts with an
    /// accurate checklist.
    pub async fn resume(
        session_id: &str,
        transport: TransportBox,
        classifier: ClassifierBox,
        rubric: TopicRubric,
        history: Vec<Message>,
        signals_tx: mpsc::UnboundedSender<StreamSignal>,
    ) -> InterviewSession {
        let progress = TopicTracker::recompute(&history, &rubric, &classifier).await;

        return InterviewSession {
            session_id: session_id.to_string(),
            transport,
            classifier,
            rubric,
            history,
            buffer: None,
            phase: Phase::Idle,
            last_error: None,
            progress,
            stream_seq: 0,
            active: None,
            signals_tx,
        };
    }

    pub fn session_id(&self) -> &str {
        return &self.session_id;
    }

    pub fn phase(&self) -> Phase {
        return self.phase;
    }

    pub fn history(&self) -> &[Message] {
        return &self.history;
    }

    pub fn buffer(&self) -> Option<&StreamingBuffer> {
        return self.buffer.as_ref();
    }

    pub fn last_error(&self) -> Option<&str> {
        return self.last_error.as_deref();
    }

    pub fn progress(&self) -> &ProgressSnapshot {
        return &self.progress;
    }

    pub fn rubric(&self) -> &TopicRubric {
        return &self.rubric;
    }

    /// Appends the user message and opens a stream for the assistant's
    /// reply. Empty input and duplicate submissions while a stream is
    /// already open are dropped silently; they are guards, not failures.
    /// The user message is committed optimistically and never rolled
    /// back, even if the request fails.
    pub fn send(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        if self.phase == Phase::Streaming {
            tracing::debug!("Dropping send while a stream is open");
            return;
        }

        self.history.push(Message::new(Role::User, trimmed));
        self.open_stream();
    }

    /// Re-issues the request for the last user message after an error,
    /// without appending a duplicate. Retry is always an explicit user
    /// action; the session never retries on its own.
    pub fn retry_last_message(&mut self) {
        if self.phase != Phase::Error {
            return;
        }
        match self.history.last() {
            Some(message) if message.role == Role::User => {}
            _ => return,
        }

        self.open_stream();
    }

    /// Drops the in-flight reply. Local state is authoritative
    /// immediately; the transport abort is best effort. The partial
    /// content is discarded, so a cancelled turn leaves no trace besides
    /// the user's question.
    pub fn cancel(&mut self) {
        if self.phase != Phase::Streaming {
            return;
        }

        if let Some(active) = self.active.take() {
            active.cancel.cancel();
            active.worker.abort();
        }

        self.buffer = None;
        self.phase = Phase::Idle;
    }

    /// Applies one signal from the stream worker. Signals from a
    /// cancelled or superseded stream carry a stale id and are dropped,
    /// so a cancelled session can never resurrect a buffer.
    pub async fn apply(&mut self, signal: StreamSignal) {
        let live = self.active.as_ref().map(|active| return active.id);
        if live != Some(signal.stream_id) {
            tracing::debug!(stream_id = signal.stream_id, "Dropping stale stream signal");
            return;
        }

        match signal.event {
            StreamEvent::Token { text } => self.on_stream_token(&text),
            StreamEvent::Progress { step, detail } => {
                self.on_stream_progress(ProgressNote { step, detail });
            }
            StreamEvent::Complete => self.on_stream_complete().await,
            StreamEvent::Error { message } => self.on_stream_error(&message),
        }
    }

    /// Appends a chunk to the buffer in arrival order. In-order delivery
    /// is the transport's responsibility.
    pub fn on_stream_token(&mut self, chunk: &str) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.partial_content += chunk;
        }
    }

    /// Replaces the interim status note. Never appends to content.
    pub fn on_stream_progress(&mut self, note: ProgressNote) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.progress_note = Some(note);
        }
    }

    /// Finalizes the buffer as an assistant message, then recomputes
    /// progress from the full history. A completion with no open buffer
    /// is a no-op rather than undefined behavior.
    pub async fn on_stream_complete(&mut self) {
        let buffer = match self.buffer.take() {
            Some(buffer) => buffer,
            None => return,
        };

        self.history
            .push(Message::new(Role::Assistant, &buffer.partial_content));
        self.phase = Phase::Idle;
        self.active = None;

        self.progress =
            TopicTracker::recompute(&self.history, &self.rubric, &self.classifier).await;
    }

    /// Discards the buffer and surfaces the error. History is left
    /// untouched so the triggering user message can be retried.
    pub fn on_stream_error(&mut self, message: &str) {
        if self.phase != Phase::Streaming {
            return;
        }

        tracing::error!(error = message, "Stream failed");
        self.buffer = None;
        self.active = None;
        self.phase = Phase::Error;
        self.last_error = Some(message.to_string());
    }

    fn open_stream(&mut self) {
        self.last_error = None;
        self.phase = Phase::Streaming;
        self.buffer = Some(StreamingBuffer::default());

        self.stream_seq += 1;
        let stream_id = self.stream_seq;
        let cancel = CancellationToken::new();

        let transport = self.transport.clone();
        let session_id = self.session_id.to_string();
        let history = self.history.clone();
        let signals_tx = self.signals_tx.clone();
        let worker_cancel = cancel.clone();

        let worker = tokio::spawn(async move {
            let (events_tx, mut events_rx) = mpsc::unbounded_channel::<StreamEvent>();

            // Transport failures, including malformed payloads, surface
            // as one error event on the same channel as everything else.
            let stream = async move {
                let res = transport
                    .open_stream(&session_id, &history, &events_tx, worker_cancel)
                    .await;

                if let Err(err) = res {
                    let _ = events_tx.send(StreamEvent::Error {
                        message: format!("{err}"),
                    });
                }
            };

            let forward = async {
                while let Some(event) = events_rx.recv().await {
                    if signals_tx.send(StreamSignal { stream_id, event }).is_err() {
                        break;
                    }
                }
            };

            tokio::join!(stream, forward);
        });

        self.active = Some(ActiveStream {
            id: stream_id,
            cancel,
            worker,
        });
    }
}
