//! Transaction framing and record emission
//!
//! The chip-select framing machine ([`TransactionAssembler`]), its bus
//! event input type, the annotated output records, and the
//! channel-driven stream front.

pub mod assembler;
pub mod event;
pub mod record;
pub mod stream;

pub use assembler::TransactionAssembler;
pub use event::{BusEvent, BusEventKind};
pub use record::{FieldTable, Record, RecordKind};
pub use stream::{StreamDecoder, StreamError};
