//! Annotated output records
//!
//! One record per completed transaction or framing violation, tagged
//! with a frame category and carrying a flat, display-oriented field
//! table. The rendering layer consumes these as-is; nothing here keeps
//! state between records.

use std::fmt;

use crate::protocol::{
    Access, ByteExchange, CatalogError, FrameKind, ProtocolMessage, catalog,
};

/// Output category tag.
///
/// Extends [`FrameKind`] with the bus-level `spi error` category and
/// displays as the exact label the rendering layer keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Register,
    Command,
    Status,
    PaTable,
    Fifo,
    /// Address decode error reported by the interpreter
    ProtocolError,
    /// Framing violation reported by the assembler
    SpiError,
}

impl From<FrameKind> for RecordKind {
    fn from(kind: FrameKind) -> Self {
        match kind {
            FrameKind::Register => Self::Register,
            FrameKind::Command => Self::Command,
            FrameKind::Status => Self::Status,
            FrameKind::PaTable => Self::PaTable,
            FrameKind::Fifo => Self::Fifo,
            FrameKind::Error => Self::ProtocolError,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Register => "register",
            Self::Command => "cmd",
            Self::Status => "status",
            Self::PaTable => "pa table",
            Self::Fifo => "fifo",
            Self::ProtocolError => "protocol error",
            Self::SpiError => "spi error",
        })
    }
}

/// Flat field table for one record. Empty strings mean "not applicable"
/// so the rendering layer can show every column unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    /// All byte pairs, e.g. `[(0D, 00) (5C, 00)]`
    pub raw_data: String,
    /// `W` or `R`
    pub access: String,
    /// `B` when the burst bit was set
    pub burst: String,
    /// Register mnemonic
    pub register: String,
    /// Written payload as hex bytes
    pub write_data: String,
    /// `OK` or `NOT RDY`
    pub chip_ready: String,
    /// Chip state name from the status byte
    pub state: String,
    /// Raw FIFO count from the status byte, as decimal text
    pub fifo_bytes_available: String,
    /// Returned payload as hex bytes
    pub read_data: String,
    /// Register description
    pub register_description: String,
    /// Compact per-kind display value
    pub focus_data: String,
    /// Framing violation detail text
    pub error_details: String,
}

/// One annotated output record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub kind: RecordKind,
    pub start_time: u64,
    pub end_time: u64,
    pub fields: FieldTable,
}

impl Record {
    /// Framing-violation record.
    pub(crate) fn spi_error(details: &str, start_time: u64, end_time: u64) -> Self {
        Self {
            kind: RecordKind::SpiError,
            start_time,
            end_time,
            fields: FieldTable {
                error_details: details.to_string(),
                ..FieldTable::default()
            },
        }
    }

    /// Build the display record for one interpreted transaction.
    pub(crate) fn from_message(
        frame: &[ByteExchange],
        msg: &ProtocolMessage,
        start_time: u64,
        end_time: u64,
    ) -> Result<Self, CatalogError> {
        let request = &msg.request;
        let response = msg.response.as_ref();

        let write_data = hex_bytes(&request.data);
        let read_data = response.map(|r| hex_bytes(&r.data)).unwrap_or_default();

        let focus_data = match request.kind {
            FrameKind::Command | FrameKind::Error => String::new(),
            FrameKind::Register | FrameKind::PaTable | FrameKind::Fifo => match request.access {
                Access::Write => write_data.clone(),
                Access::Read => read_data.clone(),
            },
            // The MARCSTATE status register shows the fine-grained FSM
            // state name instead of the raw byte. Other status
            // registers (and a MARCSTATE read with no data byte) show
            // the read data.
            FrameKind::Status => match response.and_then(|r| r.data.first()) {
                Some(&code) if request.register == "MARCSTATE" => catalog::marc_state(code)
                    .ok_or(CatalogError::MarcState(code))?
                    .name
                    .to_string(),
                _ => read_data.clone(),
            },
        };

        let fields = FieldTable {
            raw_data: raw_dump(frame),
            access: request.access.to_string(),
            burst: if request.burst {
                "B".to_string()
            } else {
                String::new()
            },
            register: request.register.to_string(),
            write_data,
            chip_ready: match response {
                None => String::new(),
                Some(r) if r.status.chip_ready => "OK".to_string(),
                Some(_) => "NOT RDY".to_string(),
            },
            state: response
                .map(|r| r.status.state.to_string())
                .unwrap_or_default(),
            fifo_bytes_available: response
                .map(|r| r.status.fifo_bytes_available.to_string())
                .unwrap_or_default(),
            read_data,
            register_description: request.description.to_string(),
            focus_data,
            error_details: String::new(),
        };

        Ok(Self {
            kind: request.kind.into(),
            start_time,
            end_time,
            fields,
        })
    }

    /// Compact one-line label for display, keyed by record kind.
    pub fn summary(&self) -> String {
        match self.kind {
            RecordKind::Register => format!(
                "Register: {} | {} = {}",
                self.fields.access, self.fields.register, self.fields.focus_data
            ),
            RecordKind::Command => format!("Command: {}", self.fields.register),
            RecordKind::Status => format!(
                "Status: {} = {}",
                self.fields.register, self.fields.focus_data
            ),
            RecordKind::PaTable => {
                format!("PA Table: {} = {}", self.fields.access, self.fields.focus_data)
            }
            RecordKind::Fifo => {
                format!("FIFO: {} = {}", self.fields.access, self.fields.focus_data)
            }
            RecordKind::ProtocolError | RecordKind::SpiError => format!("Error: {}", self.kind),
        }
    }
}

/// Uppercase hex bytes joined by spaces: `5C 01 FF`.
fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Byte-pair dump of the whole transaction: `[(0D, 00) (5C, 00)]`.
fn raw_dump(frame: &[ByteExchange]) -> String {
    let pairs = frame
        .iter()
        .map(|pair| format!("({:02X}, {:02X})", pair.mosi, pair.miso))
        .collect::<Vec<_>>()
        .join(" ");
    format!("[{}]", pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::interpret;

    fn frame(mosi: &[u8], miso: &[u8]) -> Vec<ByteExchange> {
        mosi.iter()
            .zip(miso)
            .map(|(&mosi, &miso)| ByteExchange { mosi, miso })
            .collect()
    }

    fn record_for(mosi: &[u8], miso: &[u8]) -> Record {
        let transaction = frame(mosi, miso);
        let msg = interpret(&transaction).unwrap();
        Record::from_message(&transaction, &msg, 100, 200).unwrap()
    }

    #[test]
    fn test_register_write_fields() {
        let record = record_for(&[0x0D, 0x5C], &[0x0F, 0x0F]);
        assert_eq!(record.kind, RecordKind::Register);
        assert_eq!(record.fields.raw_data, "[(0D, 0F) (5C, 0F)]");
        assert_eq!(record.fields.access, "W");
        assert_eq!(record.fields.burst, "");
        assert_eq!(record.fields.register, "FREQ2");
        assert_eq!(record.fields.write_data, "5C");
        assert_eq!(record.fields.read_data, "");
        assert_eq!(record.fields.chip_ready, "");
        assert_eq!(record.fields.focus_data, "5C");
        assert_eq!(record.summary(), "Register: W | FREQ2 = 5C");
    }

    #[test]
    fn test_register_read_fields() {
        let record = record_for(&[0x8D, 0x00], &[0x10, 0x5C]);
        assert_eq!(record.fields.access, "R");
        assert_eq!(record.fields.chip_ready, "OK");
        assert_eq!(record.fields.state, "RX");
        assert_eq!(record.fields.fifo_bytes_available, "0");
        assert_eq!(record.fields.read_data, "5C");
        assert_eq!(record.fields.focus_data, "5C");
    }

    #[test]
    fn test_not_ready_status() {
        let record = record_for(&[0xBD], &[0x80]);
        assert_eq!(record.kind, RecordKind::Command);
        assert_eq!(record.fields.chip_ready, "NOT RDY");
        assert_eq!(record.fields.focus_data, "");
        assert_eq!(record.summary(), "Command: SNOP");
    }

    #[test]
    fn test_marcstate_focus_uses_fine_grained_state_name() {
        // MARCSTATE read returning code 0x0A (FS_LOCK, group SETTLING)
        let record = record_for(&[0xF5, 0x00], &[0x1F, 0x0A]);
        assert_eq!(record.kind, RecordKind::Status);
        assert_eq!(record.fields.read_data, "0A");
        assert_eq!(record.fields.focus_data, "FS_LOCK");
        assert_eq!(record.summary(), "Status: MARCSTATE = FS_LOCK");
    }

    #[test]
    fn test_other_status_registers_focus_on_read_data() {
        // RXBYTES read
        let record = record_for(&[0xFB, 0x00], &[0x1F, 0x07]);
        assert_eq!(record.fields.register, "RXBYTES");
        assert_eq!(record.fields.focus_data, "07");
    }

    #[test]
    fn test_marcstate_with_undocumented_code_is_fatal() {
        let transaction = frame(&[0xF5, 0x00], &[0x1F, 0x42]);
        let msg = interpret(&transaction).unwrap();
        assert_eq!(
            Record::from_message(&transaction, &msg, 0, 0),
            Err(CatalogError::MarcState(0x42))
        );
    }

    #[test]
    fn test_fifo_burst_read_focus() {
        let record = record_for(&[0xFF, 0x00, 0x00], &[0x1F, 0xAA, 0xBB]);
        assert_eq!(record.kind, RecordKind::Fifo);
        assert_eq!(record.fields.focus_data, "AA BB");
        assert_eq!(record.summary(), "FIFO: R = AA BB");
    }

    #[test]
    fn test_protocol_error_record() {
        let record = record_for(&[0xB7], &[0x0F]);
        assert_eq!(record.kind, RecordKind::ProtocolError);
        assert_eq!(record.fields.register, "");
        assert_eq!(record.fields.focus_data, "");
        assert_eq!(record.summary(), "Error: protocol error");
    }

    #[test]
    fn test_spi_error_record() {
        let record = Record::spi_error("no SPI frame", 5, 9);
        assert_eq!(record.kind, RecordKind::SpiError);
        assert_eq!(record.start_time, 5);
        assert_eq!(record.end_time, 9);
        assert_eq!(record.fields.error_details, "no SPI frame");
        assert_eq!(record.fields.raw_data, "");
        assert_eq!(record.summary(), "Error: spi error");
    }

    #[test]
    fn test_kind_labels() {
        let labels: Vec<String> = [
            RecordKind::Register,
            RecordKind::Command,
            RecordKind::Status,
            RecordKind::PaTable,
            RecordKind::Fifo,
            RecordKind::ProtocolError,
            RecordKind::SpiError,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(
            labels,
            [
                "register",
                "cmd",
                "status",
                "pa table",
                "fifo",
                "protocol error",
                "spi error",
            ]
        );
    }
}
