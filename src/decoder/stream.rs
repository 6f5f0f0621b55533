//! Channel-driven decoding
//!
//! Connects a capture source to the assembler over crossbeam channels:
//! bus events in, annotated records out. One event is fully processed
//! before the next is received, so decoding stays strictly ordered and
//! single-threaded regardless of how the channels are fed.

use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use super::assembler::TransactionAssembler;
use super::event::BusEvent;
use super::record::Record;
use crate::protocol::CatalogError;

/// Stream decode failure.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Fatal catalog-completeness defect surfaced while decoding.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The record consumer went away while events were still arriving.
    #[error("record channel disconnected")]
    Disconnected,
}

/// Drives one [`TransactionAssembler`] from an event channel.
pub struct StreamDecoder {
    assembler: TransactionAssembler,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self {
            assembler: TransactionAssembler::new(),
        }
    }

    /// With custom name (used in log output).
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            assembler: self.assembler.with_name(name),
        }
    }

    /// Decode until the event channel disconnects (end of capture).
    ///
    /// Returns the number of records forwarded.
    pub fn run(
        &mut self,
        events: &Receiver<BusEvent>,
        records: &Sender<Record>,
    ) -> Result<u64, StreamError> {
        let mut forwarded = 0u64;
        for event in events.iter() {
            if let Some(record) = self.assembler.process(event)? {
                records.send(record).map_err(|_| StreamError::Disconnected)?;
                forwarded += 1;
            }
        }
        debug!(
            "event channel closed after {} records ({} transactions)",
            forwarded,
            self.assembler.transactions_decoded()
        );
        Ok(forwarded)
    }
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}
