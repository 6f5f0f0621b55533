//! Chip status byte decoding
//!
//! Every read access returns the chip status byte on MISO while the
//! header byte is still being clocked out (Table 23): CHIP_RDYn in bit
//! 7, the main state machine mode in bits 6:4, and FIFO_BYTES_AVAILABLE
//! in bits 3:0.

use std::fmt;

/// Main state machine mode reported in status byte bits 6:4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipState {
    /// IDLE state (also reported for some transitional states instead
    /// of SETTLING or CALIBRATE)
    Idle,
    /// Receive mode
    Rx,
    /// Transmit mode
    Tx,
    /// Fast TX ready
    FstxOn,
    /// Frequency synthesizer calibration is running
    Calibrate,
    /// PLL is settling
    Settling,
    /// RX FIFO has overflowed; read out any useful data, then flush
    /// with SFRX
    RxFifoOverflow,
    /// TX FIFO has underflowed; acknowledge with SFTX
    TxFifoUnderflow,
}

impl ChipState {
    /// Decode the 3-bit STATE field. Total: every field value names a
    /// state.
    fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0b000 => Self::Idle,
            0b001 => Self::Rx,
            0b010 => Self::Tx,
            0b011 => Self::FstxOn,
            0b100 => Self::Calibrate,
            0b101 => Self::Settling,
            0b110 => Self::RxFifoOverflow,
            _ => Self::TxFifoUnderflow,
        }
    }

    /// Datasheet name of the state.
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Rx => "RX",
            Self::Tx => "TX",
            Self::FstxOn => "FSTXON",
            Self::Calibrate => "CALIBRATE",
            Self::Settling => "SETTLING",
            Self::RxFifoOverflow => "RXFIFO_OVERFLOW",
            Self::TxFifoUnderflow => "TXFIFO_UNDERFLOW",
        }
    }
}

impl fmt::Display for ChipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded chip status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusByte {
    /// CHIP_RDYn is active-low: the bit stays high until power and the
    /// crystal have stabilized, so a cleared bit means the chip is
    /// ready.
    pub chip_ready: bool,
    /// Main state machine mode (bits 6:4)
    pub state: ChipState,
    /// Raw FIFO count field (bits 3:0). Depending on the register this
    /// is RX bytes available, TX bytes free, or has an over/underflow
    /// flag folded in; interpretation is left to the display layer.
    pub fifo_bytes_available: u8,
}

impl StatusByte {
    /// Decode one status byte.
    pub fn decode(byte: u8) -> Self {
        Self {
            chip_ready: byte & 0x80 == 0,
            state: ChipState::from_bits((byte & 0x70) >> 4),
            fifo_bytes_available: byte & 0x0F,
        }
    }
}
