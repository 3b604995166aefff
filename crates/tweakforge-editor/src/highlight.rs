//! Token rows for the displayed buffer, computed inline or on a worker.
//!
//! Buffers shorter than the threshold are tokenized synchronously. Longer
//! buffers are tokenized on a background thread. Each request bumps a
//! generation counter; results tagged with an older generation are dropped
//! when they arrive so a slow pass can never overwrite a newer buffer's rows.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Receiver, Sender},
};
use std::thread::{self, JoinHandle};

use tracing::{debug, trace, warn};
use tweakforge_lexer::{Token, tokenize, tokenize_lines};

use crate::error::HighlightError;

const HIGHLIGHT_TARGET: &str = "tweakforge_editor::highlight";

/// Logical line count at which tokenizing moves off the calling thread.
pub const DEFAULT_HIGHLIGHT_THRESHOLD: usize = 200;

/// Tokens for each logical line of a buffer.
pub type TokenRows = Vec<Vec<Token>>;

/// How a highlight request was serviced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightStatus {
    /// Rows for the request are already available.
    Ready,
    /// A background pass is running; poll or wait for its rows.
    Pending,
}

type Pass = fn(u64, &str, &AtomicBool, &Sender<Finished>);

struct Finished {
    generation: u64,
    rows: Option<TokenRows>,
}

struct InFlight {
    generation: u64,
    cancel: Arc<AtomicBool>,
    text: Arc<str>,
    handle: Option<JoinHandle<()>>,
}

impl InFlight {
    fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }
}

/// Schedules tokenizing for the editor's displayed text.
pub struct Highlighter {
    threshold: usize,
    generation: u64,
    applied: u64,
    rows: TokenRows,
    in_flight: Option<InFlight>,
    sender: Sender<Finished>,
    receiver: Receiver<Finished>,
    pass: Pass,
}

impl Highlighter {
    /// Creates a highlighter that defers buffers of at least `threshold`
    /// logical lines.
    #[must_use]
    pub fn new(threshold: usize) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            threshold,
            generation: 0,
            applied: 0,
            rows: Vec::new(),
            in_flight: None,
            sender,
            receiver,
            pass: run_pass,
        }
    }

    /// Line count at which tokenizing is deferred.
    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    /// Generation of the most recent request.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Rows of the last completed pass.
    ///
    /// While a background pass is pending these belong to an earlier buffer.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Token>] {
        &self.rows
    }

    /// True when the rows lag behind the most recent request.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.applied != self.generation
    }

    /// Requests rows for `text`, superseding any pass still in flight.
    pub fn request(&mut self, text: &str) -> HighlightStatus {
        self.generation = self.generation.wrapping_add(1);
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
            trace!(
                target: HIGHLIGHT_TARGET,
                superseded = previous.generation,
                generation = self.generation,
                "cancelled in-flight highlight pass"
            );
        }

        let line_count = text.split('\n').count();
        if line_count < self.threshold {
            self.apply(self.generation, tokenize_lines(text));
            return HighlightStatus::Ready;
        }

        match self.spawn(text) {
            Ok(in_flight) => {
                debug!(
                    target: HIGHLIGHT_TARGET,
                    generation = self.generation,
                    lines = line_count,
                    "deferred highlight pass"
                );
                self.in_flight = Some(in_flight);
                HighlightStatus::Pending
            }
            Err(error) => {
                self.fall_back(&error, text);
                HighlightStatus::Ready
            }
        }
    }

    /// Applies any finished background results without blocking.
    ///
    /// Returns true when the rows changed.
    pub fn poll(&mut self) -> bool {
        let before = self.applied;
        self.drain();
        if let Some(generation) = self.finished_without_result() {
            self.recover(generation);
        }
        self.applied != before
    }

    /// Blocks until rows for the most recent request are available.
    pub fn wait(&mut self) -> &[Vec<Token>] {
        if let Some(in_flight) = self.in_flight.as_mut() {
            let generation = in_flight.generation;
            let joined = in_flight
                .handle
                .take()
                .is_none_or(|handle| handle.join().is_ok());
            self.drain();
            if !joined || self.in_flight.is_some() {
                self.recover(generation);
            }
        }
        &self.rows
    }

    fn spawn(&self, text: &str) -> Result<InFlight, HighlightError> {
        let generation = self.generation;
        let cancel = Arc::new(AtomicBool::new(false));
        let shared: Arc<str> = Arc::from(text);
        let worker_cancel = Arc::clone(&cancel);
        let worker_text = Arc::clone(&shared);
        let sender = self.sender.clone();
        let pass = self.pass;
        let handle = thread::Builder::new()
            .name(String::from("tweakforge-highlight"))
            .spawn(move || pass(generation, &worker_text, &worker_cancel, &sender))
            .map_err(HighlightError::spawn)?;
        Ok(InFlight {
            generation,
            cancel,
            text: shared,
            handle: Some(handle),
        })
    }

    fn drain(&mut self) {
        while let Ok(finished) = self.receiver.try_recv() {
            match finished.rows {
                Some(rows) if finished.generation == self.generation => {
                    self.in_flight = None;
                    self.apply(finished.generation, rows);
                }
                _ => trace!(
                    target: HIGHLIGHT_TARGET,
                    stale = finished.generation,
                    current = self.generation,
                    "discarded superseded highlight result"
                ),
            }
        }
    }

    fn finished_without_result(&mut self) -> Option<u64> {
        let in_flight = self.in_flight.as_ref()?;
        let finished = in_flight
            .handle
            .as_ref()
            .is_none_or(JoinHandle::is_finished);
        if !finished {
            return None;
        }
        // The worker sends before it exits, so one more drain settles it.
        self.drain();
        self.in_flight.as_ref().map(|pending| pending.generation)
    }

    fn recover(&mut self, generation: u64) {
        if let Some(in_flight) = self.in_flight.take() {
            let text = Arc::clone(&in_flight.text);
            self.fall_back(&HighlightError::worker_lost(generation), &text);
        }
    }

    fn fall_back(&mut self, error: &HighlightError, text: &str) {
        warn!(
            target: HIGHLIGHT_TARGET,
            generation = self.generation,
            %error,
            "background highlighting failed; tokenizing synchronously"
        );
        self.apply(self.generation, tokenize_lines(text));
    }

    fn apply(&mut self, generation: u64, rows: TokenRows) {
        self.applied = generation;
        self.rows = rows;
    }
}

#[cfg(test)]
impl Highlighter {
    /// Highlighter whose workers exit without reporting any rows.
    pub(crate) fn with_silent_worker(threshold: usize) -> Self {
        let mut highlighter = Self::new(threshold);
        highlighter.pass = silent_pass;
        highlighter
    }

    /// Highlighter whose workers panic before reporting any rows.
    pub(crate) fn with_crashing_worker(threshold: usize) -> Self {
        let mut highlighter = Self::new(threshold);
        highlighter.pass = crashing_pass;
        highlighter
    }
}

#[cfg(test)]
fn silent_pass(_: u64, _: &str, _: &AtomicBool, _: &Sender<Finished>) {}

#[cfg(test)]
fn crashing_pass(generation: u64, _: &str, _: &AtomicBool, _: &Sender<Finished>) {
    panic!("highlight pass {generation} crashed");
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_THRESHOLD)
    }
}

impl Drop for Highlighter {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel();
        }
    }
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("threshold", &self.threshold)
            .field("generation", &self.generation)
            .field("applied", &self.applied)
            .field("rows", &self.rows.len())
            .finish_non_exhaustive()
    }
}

fn run_pass(generation: u64, text: &str, cancel: &AtomicBool, sender: &Sender<Finished>) {
    let mut rows = Vec::new();
    for line in text.split('\n') {
        if cancel.load(Ordering::SeqCst) {
            trace!(target: HIGHLIGHT_TARGET, generation, "highlight pass cancelled");
            send(sender, Finished { generation, rows: None });
            return;
        }
        rows.push(tokenize(line));
    }
    send(
        sender,
        Finished {
            generation,
            rows: Some(rows),
        },
    );
}

fn send(sender: &Sender<Finished>, finished: Finished) {
    if sender.send(finished).is_err() {
        trace!(target: HIGHLIGHT_TARGET, "highlighter dropped before pass finished");
    }
}
