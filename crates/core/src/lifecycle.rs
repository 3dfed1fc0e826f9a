//! Generate-then-export lifecycle shared by the crossword and horoscope pages.
//!
//! ```text
//! Idle ──request──▶ Requesting ──ok──▶ Ready ──export──▶ (Exporting) ──▶ Ready
//!                        │                 │
//!                        └──err──▶ Failed  └──request──▶ Requesting
//! ```
//!
//! A page holds at most one in-flight request. Each request is identified by
//! a [`RequestTicket`]; a response carrying a ticket other than the current
//! one is stale and is dropped instead of overwriting newer state.

use crate::error::CoreError;

/// Coarse phase of a page, for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Requesting,
    Ready,
    Failed,
}

/// Identifies one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug)]
enum State<T> {
    Idle,
    Requesting(RequestTicket),
    Ready(T),
    Failed(String),
}

/// Owner of a page's generated content.
#[derive(Debug)]
pub struct GenerationState<T> {
    state: State<T>,
    issued: u64,
    exports: u32,
}

impl<T> Default for GenerationState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GenerationState<T> {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            issued: 0,
            exports: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::Requesting(_) => Phase::Requesting,
            State::Ready(_) => Phase::Ready,
            State::Failed(_) => Phase::Failed,
        }
    }

    /// Enter `Requesting`. Refused while another request is in flight.
    ///
    /// Any previously generated content is discarded.
    pub fn begin_request(&mut self) -> Result<RequestTicket, CoreError> {
        if let State::Requesting(_) = self.state {
            return Err(CoreError::Conflict(
                "A generation request is already in flight".to_string(),
            ));
        }
        self.issued += 1;
        let ticket = RequestTicket(self.issued);
        self.state = State::Requesting(ticket);
        self.exports = 0;
        Ok(ticket)
    }

    /// Settle the request identified by `ticket`.
    ///
    /// Returns `false` (and changes nothing) when the ticket is stale.
    pub fn finish(&mut self, ticket: RequestTicket, outcome: Result<T, String>) -> bool {
        match self.state {
            State::Requesting(current) if current == ticket => {
                self.state = match outcome {
                    Ok(content) => State::Ready(content),
                    Err(message) => State::Failed(message),
                };
                true
            }
            _ => false,
        }
    }

    /// Run `export` against the ready content.
    ///
    /// Export never changes the generation state and may be repeated.
    pub fn export<R>(&mut self, export: impl FnOnce(&T) -> R) -> Result<R, CoreError> {
        match &self.state {
            State::Ready(content) => {
                let out = export(content);
                self.exports += 1;
                Ok(out)
            }
            _ => Err(CoreError::Conflict(format!(
                "Nothing to export while {:?}",
                self.phase()
            ))),
        }
    }

    pub fn content(&self) -> Option<&T> {
        match &self.state {
            State::Ready(content) => Some(content),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            State::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Exports taken since the content was generated.
    pub fn export_count(&self) -> u32 {
        self.exports
    }
}
