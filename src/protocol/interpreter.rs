//! CC1101 SPI command interpretation
//!
//! Applies the chip's address-decoding rules to one assembled
//! transaction. The precedence order matters: command strobes and status
//! registers share the 0x30-0x3D address range and are told apart only
//! by the read+burst bits of the header byte, while 0x3E/0x3F always
//! select the multi-byte PATABLE/FIFO regardless of those bits.

use std::fmt;

use tracing::trace;

use super::catalog::{
    self, FIFO_ADDR, PATABLE_ADDR, RESERVED_STROBE, RegisterInfo, STROBE_FIRST, STROBE_LAST,
};
use super::status::StatusByte;

/// Bit 7 of the header byte: read access.
const READ_BIT: u8 = 0x80;
/// Bit 6 of the header byte: burst access (or, with read, the status
/// register namespace).
const BURST_BIT: u8 = 0x40;
/// Low 6 bits of the header byte: register address.
const ADDRESS_MASK: u8 = 0x3F;

/// One simultaneously clocked MOSI/MISO byte pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteExchange {
    /// Byte the master drove
    pub mosi: u8,
    /// Byte the chip drove back in the same clock window
    pub miso: u8,
}

/// Access direction from bit 7 of the header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Master writes to the chip
    Write,
    /// Master reads from the chip
    Read,
}

impl Access {
    /// Whether this is a read access (the chip returns data).
    pub fn is_read(self) -> bool {
        matches!(self, Self::Read)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Write => "W",
            Self::Read => "R",
        })
    }
}

/// Protocol-level category of one transaction.
///
/// Displays as the frame tag the rendering layer keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Configuration register access (0x00-0x2E)
    Register,
    /// Command strobe (0x30-0x3D, except read+burst)
    Command,
    /// Status register read (0x30-0x3D with read+burst)
    Status,
    /// PA table access (0x3E)
    PaTable,
    /// TX/RX FIFO access (0x3F)
    Fifo,
    /// Address decode error
    Error,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Register => "register",
            Self::Command => "cmd",
            Self::Status => "status",
            Self::PaTable => "pa table",
            Self::Fifo => "fifo",
            Self::Error => "protocol error",
        })
    }
}

/// Fatal catalog-completeness failure: a lookup the decision tree
/// guarantees must succeed came back empty. This indicates a defect in
/// the static tables, not bad bus traffic, so it propagates as an error
/// instead of becoming an output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("configuration register 0x{0:02X} missing from catalog")]
    ConfigRegister(u8),

    #[error("command strobe 0x{0:02X} missing from catalog")]
    CommandStrobe(u8),

    #[error("status register 0x{0:02X} missing from catalog")]
    StatusRegister(u8),

    #[error("multi-byte register 0x{0:02X} missing from catalog")]
    MultiByteRegister(u8),

    #[error("undocumented control state machine code 0x{0:02X}")]
    MarcState(u8),
}

/// Decoded request half of a transaction (everything on MOSI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// Access direction from the header byte
    pub access: Access,
    /// Burst flag from the header byte
    pub burst: bool,
    /// Frame category after address decoding
    pub kind: FrameKind,
    /// Register mnemonic; empty for error frames
    pub register: &'static str,
    /// Register description; empty for error frames
    pub description: &'static str,
    /// Payload bytes clocked after the header
    pub data: Vec<u8>,
    /// Address decode error, if the frame is an error frame
    pub error: Option<&'static str>,
}

/// Response half of a transaction (everything on MISO). Present if and
/// only if the request reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    /// Chip status byte returned while the header was clocked
    pub status: StatusByte,
    /// Payload bytes returned after the status byte
    pub data: Vec<u8>,
}

/// One fully decoded transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolMessage {
    pub request: ParsedRequest,
    pub response: Option<ParsedResponse>,
}

/// Interpret one chip-select framed transaction.
///
/// `frame` must hold at least one byte pair; the assembler discards
/// empty transactions before they get here. The result is a fresh value
/// with no state carried between calls.
pub fn interpret(frame: &[ByteExchange]) -> Result<ProtocolMessage, CatalogError> {
    assert!(!frame.is_empty(), "a transaction has at least one byte pair");

    let header = frame[0].mosi;
    let access = if header & READ_BIT != 0 {
        Access::Read
    } else {
        Access::Write
    };
    let burst = header & BURST_BIT != 0;

    let (kind, info, error) = classify(header, access, burst)?;
    let (register, description) = match info {
        Some(info) => (info.name, info.description),
        None => ("", ""),
    };
    trace!(
        "header 0x{:02X}: {} {}{} {}",
        header,
        kind,
        access,
        if burst { "B" } else { "" },
        register
    );

    let request = ParsedRequest {
        access,
        burst,
        kind,
        register,
        description,
        data: frame[1..].iter().map(|pair| pair.mosi).collect(),
        error,
    };

    let response = access.is_read().then(|| ParsedResponse {
        status: StatusByte::decode(frame[0].miso),
        data: frame[1..].iter().map(|pair| pair.miso).collect(),
    });

    Ok(ProtocolMessage { request, response })
}

/// The address decision tree. The branch order is dictated by the
/// chip's overlapping address spaces and must not be reordered: a
/// read+burst header in 0x30-0x3D always selects the status register
/// namespace, never a strobe.
fn classify(
    header: u8,
    access: Access,
    burst: bool,
) -> Result<(FrameKind, Option<&'static RegisterInfo>, Option<&'static str>), CatalogError> {
    let address = header & ADDRESS_MASK;

    if address < STROBE_FIRST {
        let info =
            catalog::config_register(address).ok_or(CatalogError::ConfigRegister(address))?;
        Ok((FrameKind::Register, Some(info), None))
    } else if address == PATABLE_ADDR {
        let info = catalog::multi_byte_register(address)
            .ok_or(CatalogError::MultiByteRegister(address))?;
        Ok((FrameKind::PaTable, Some(info), None))
    } else if address == FIFO_ADDR {
        let info = catalog::multi_byte_register(address)
            .ok_or(CatalogError::MultiByteRegister(address))?;
        Ok((FrameKind::Fifo, Some(info), None))
    } else if access.is_read() && burst {
        let info =
            catalog::status_register(address).ok_or(CatalogError::StatusRegister(address))?;
        Ok((FrameKind::Status, Some(info), None))
    } else if address <= STROBE_LAST {
        if address != RESERVED_STROBE {
            let info =
                catalog::command_strobe(address).ok_or(CatalogError::CommandStrobe(address))?;
            Ok((FrameKind::Command, Some(info), None))
        } else {
            Ok((FrameKind::Error, None, Some("Invalid COMMAND")))
        }
    } else {
        // Unreachable after the PATABLE/FIFO branches; kept so the code
        // mirrors the full address decision tree.
        Ok((FrameKind::Error, None, Some("Invalid ADDRESS")))
    }
}
