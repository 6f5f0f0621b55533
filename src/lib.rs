//! CC1101 SPI protocol analyzer
//!
//! Decodes the SPI command protocol of the TI CC1101 sub-GHz radio
//! transceiver from a captured stream of bus-level events (chip-select
//! framed MOSI/MISO byte pairs), as delivered by a logic-analyzer
//! capture engine.
//!
//! # Architecture
//!
//! - **Transaction assembler**: framing state machine that turns raw
//!   enable/byte/error events into delimited transactions, with
//!   self-healing error recovery
//! - **Protocol interpreter**: applies the chip's address-decoding
//!   precedence (configuration registers, command strobes, status
//!   registers, PATABLE, FIFO) and decodes the returned status byte
//! - **Records**: one annotated record per transaction or framing
//!   violation, carrying a flat display-oriented field table
//! - **Stream front**: crossbeam-channel loop connecting a capture
//!   source to the assembler
//!
//! # Example
//!
//! ```
//! use cc1101_analyzer::{BusEvent, RecordKind, TransactionAssembler};
//!
//! let mut assembler = TransactionAssembler::new();
//! // Write 0x5C to FREQ2 (register 0x0D)
//! for event in [
//!     BusEvent::enable_asserted(0),
//!     BusEvent::byte_exchanged(0x0D, 0x0F, 10, 20),
//!     BusEvent::byte_exchanged(0x5C, 0x0F, 20, 30),
//! ] {
//!     assert!(assembler.process(event).unwrap().is_none());
//! }
//! let record = assembler
//!     .process(BusEvent::enable_deasserted(40))
//!     .unwrap()
//!     .expect("completed transaction");
//! assert_eq!(record.kind, RecordKind::Register);
//! assert_eq!(record.summary(), "Register: W | FREQ2 = 5C");
//! ```

pub mod decoder;
pub mod protocol;

pub use decoder::{
    BusEvent, BusEventKind, FieldTable, Record, RecordKind, StreamDecoder, StreamError,
    TransactionAssembler,
};
pub use protocol::{
    Access, ByteExchange, CatalogError, ChipState, FrameKind, ParsedRequest, ParsedResponse,
    ProtocolMessage, StatusByte, interpret,
};
