//! Upload lifecycle state machine.
//!
//! One file slot moves through `Idle -> Transferring -> {Succeeded, Failed}` and back to
//! `Idle` on removal or when the next transfer starts. The controller never performs I/O:
//! callers report lifecycle events and receive tickets describing the next request to make.
//!
//! Every transfer bumps a generation counter, and so does removal. A fetch ticket remembers
//! the generation it was issued for, and its result is dropped if the counter has moved on,
//! so a slow fetch can never repaint results after the user has moved on.

use pairspan_core::{
    DateFormat, FetchError, LogLevel, PairAggregate, TransferError, UploadedFile,
    GENERIC_TRANSFER_ERROR,
};
use tokio_util::sync::CancellationToken;

use crate::table::ResultsTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Transferring,
    Succeeded,
    Failed,
}

/// Issued when a transfer starts; carries the format captured at that moment.
#[derive(Debug)]
pub struct TransferTicket {
    generation: u64,
    pattern: DateFormat,
    cancel: CancellationToken,
}

impl TransferTicket {
    pub fn pattern(&self) -> DateFormat {
        self.pattern
    }

    /// Cancelled when the file is removed, a new transfer starts or the session ends.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Issued exactly once per successful transfer.
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    identifier: String,
    cancel: CancellationToken,
}

impl FetchTicket {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Cancelled when the file is removed or a new transfer starts.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDisposition {
    Applied,
    Stale,
    Cancelled,
    Failed,
}

#[derive(Debug)]
pub struct UploadController {
    state: UploadState,
    file: Option<UploadedFile>,
    error: Option<&'static str>,
    results: Option<Vec<PairAggregate>>,
    generation: u64,
    in_flight: Option<CancellationToken>,
    session: CancellationToken,
}

impl Default for UploadController {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadController {
    pub fn new() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    /// Transfer and fetch tokens are children of `session`; cancelling it abandons whatever
    /// request is in flight.
    pub fn with_cancellation(session: CancellationToken) -> Self {
        Self {
            state: UploadState::Idle,
            file: None,
            error: None,
            results: None,
            generation: 0,
            in_flight: None,
            session,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn results(&self) -> Option<&[PairAggregate]> {
        self.results.as_deref()
    }

    /// The table is only shown while a file is present and results were loaded.
    pub fn table(&self) -> Option<ResultsTable> {
        self.file.as_ref()?;
        self.results.as_deref().map(ResultsTable::from_aggregates)
    }

    pub fn on_transfer_start(&mut self, pattern: DateFormat) -> TransferTicket {
        self.cancel_in_flight();
        self.generation += 1;
        self.file = None;
        self.error = None;
        self.state = UploadState::Transferring;

        let cancel = self.session.child_token();
        self.in_flight = Some(cancel.clone());
        tracing::debug!(generation = self.generation, %pattern, "Transfer started");
        TransferTicket {
            generation: self.generation,
            pattern,
            cancel,
        }
    }

    /// The transfer was abandoned before it completed. Returns to `Idle` without an error.
    pub fn on_transfer_cancelled(&mut self, ticket: TransferTicket) {
        if ticket.generation != self.generation {
            return;
        }
        tracing::debug!(generation = ticket.generation, "Transfer cancelled");
        self.in_flight = None;
        self.file = None;
        self.state = UploadState::Idle;
    }

    /// Returns the fetch to issue, or `None` when the transfer failed or was superseded.
    pub fn on_transfer_complete(
        &mut self,
        ticket: TransferTicket,
        outcome: Result<UploadedFile, TransferError>,
    ) -> Option<FetchTicket> {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Ignoring completion of superseded transfer"
            );
            return None;
        }

        self.in_flight = None;
        match outcome {
            Err(err) => {
                log_transfer_error(&err);
                self.error = Some(GENERIC_TRANSFER_ERROR);
                self.file = None;
                self.results = None;
                self.state = UploadState::Failed;
                None
            }
            Ok(file) => {
                let identifier = file.identifier.clone();
                self.file = Some(file);
                self.error = None;
                self.state = UploadState::Succeeded;

                let cancel = self.session.child_token();
                self.in_flight = Some(cancel.clone());
                Some(FetchTicket {
                    generation: self.generation,
                    identifier,
                    cancel,
                })
            }
        }
    }

    pub fn on_remove(&mut self) {
        self.cancel_in_flight();
        self.generation += 1;
        self.file = None;
        self.error = None;
        self.results = None;
        self.state = UploadState::Idle;
    }

    pub fn on_fetch_complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<PairAggregate>, FetchError>,
    ) -> FetchDisposition {
        if ticket.generation != self.generation {
            tracing::debug!(
                file = %ticket.identifier,
                ticket = ticket.generation,
                current = self.generation,
                "Discarding results of stale fetch"
            );
            return FetchDisposition::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(pairs) => {
                tracing::debug!(file = %ticket.identifier, rows = pairs.len(), "Loaded results");
                self.results = Some(pairs);
                FetchDisposition::Applied
            }
            Err(FetchError::Cancelled) => {
                tracing::debug!(file = %ticket.identifier, "Fetch cancelled");
                FetchDisposition::Cancelled
            }
            Err(FetchError::Other(err)) => {
                tracing::warn!(
                    file = %ticket.identifier,
                    error = %format!("{:#}", err),
                    "An error occurred while trying to load processed file content"
                );
                FetchDisposition::Failed
            }
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}

fn log_transfer_error(err: &TransferError) {
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Warn => tracing::warn!(code, error = %err, "Attachment upload failed"),
        LogLevel::Error => tracing::error!(code, error = %err, "Attachment upload failed"),
    }
}
