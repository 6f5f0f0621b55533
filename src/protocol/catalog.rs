//! CC1101 register, strobe, and state catalogs
//!
//! Static lookup tables from the CC1101 datasheet: configuration
//! registers (Table 43), command strobes (Table 42), status registers
//! (Table 44), the multi-byte PATABLE/FIFO addresses, and the main radio
//! control state machine codes (Figure 25).
//!
//! The tables are process-wide constants and each one only answers for
//! its own address domain — the interpreter decides which table applies
//! to a given header byte, since strobes and status registers share the
//! same numeric range.

/// Descriptor for one addressable register or command strobe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterInfo {
    /// 6-bit address as it appears on the SPI bus
    pub address: u8,
    /// Datasheet mnemonic
    pub name: &'static str,
    /// Datasheet description
    pub description: &'static str,
}

/// One entry of the main radio control state machine table.
///
/// `name` is the fine-grained FSM state; `group` is the coarser mode
/// several codes collapse into (BWBOOST/FS_LOCK/IFADCON are all
/// SETTLING, STARTCAL/ENDCAL are both CALIBRATE, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarcStateInfo {
    /// 5-bit MARC_STATE code
    pub code: u8,
    /// Fine-grained state name
    pub name: &'static str,
    /// Coarse state group
    pub group: &'static str,
}

/// First address of the strobe/status window; everything below is
/// configuration register space.
pub const STROBE_FIRST: u8 = 0x30;
/// Last address of the strobe/status window.
pub const STROBE_LAST: u8 = 0x3D;
/// 0x37 has no command strobe assigned — it only exists as the WORTIME0
/// status register, reachable via read+burst.
pub const RESERVED_STROBE: u8 = 0x37;
/// PA table address.
pub const PATABLE_ADDR: u8 = 0x3E;
/// TX/RX FIFO address.
pub const FIFO_ADDR: u8 = 0x3F;

const fn reg(address: u8, name: &'static str, description: &'static str) -> RegisterInfo {
    RegisterInfo {
        address,
        name,
        description,
    }
}

const fn marc(code: u8, name: &'static str, group: &'static str) -> MarcStateInfo {
    MarcStateInfo { code, name, group }
}

/// Configuration registers 0x00-0x2E (Table 43). Dense: the entry for
/// address `a` sits at index `a`.
pub static CONFIG_REGISTERS: [RegisterInfo; 47] = [
    reg(0x00, "IOCFG2", "GDO2 output pin configuration"),
    reg(0x01, "IOCFG1", "GDO1 output pin configuration"),
    reg(0x02, "IOCFG0", "GDO0 output pin configuration"),
    reg(0x03, "FIFOTHR", "RX FIFO and TX FIFO thresholds"),
    reg(0x04, "SYNC1", "Sync word, high byte"),
    reg(0x05, "SYNC0", "Sync word, low byte"),
    reg(0x06, "PKTLEN", "Packet length"),
    reg(0x07, "PKTCTRL1", "Packet automation control"),
    reg(0x08, "PKTCTRL0", "Packet automation control"),
    reg(0x09, "ADDR", "Device address"),
    reg(0x0A, "CHANNR", "Channel number"),
    reg(0x0B, "FSCTRL1", "Frequency synthesizer control"),
    reg(0x0C, "FSCTRL0", "Frequency synthesizer control"),
    reg(0x0D, "FREQ2", "Frequency control word, high byte"),
    reg(0x0E, "FREQ1", "Frequency control word, middle byte"),
    reg(0x0F, "FREQ0", "Frequency control word, low byte"),
    reg(0x10, "MDMCFG4", "Modem configuration"),
    reg(0x11, "MDMCFG3", "Modem configuration"),
    reg(0x12, "MDMCFG2", "Modem configuration"),
    reg(0x13, "MDMCFG1", "Modem configuration"),
    reg(0x14, "MDMCFG0", "Modem configuration"),
    reg(0x15, "DEVIATN", "Modem deviation setting"),
    reg(0x16, "MCSM2", "Main Radio Control State Machine configuration"),
    reg(0x17, "MCSM1", "Main Radio Control State Machine configuration"),
    reg(0x18, "MCSM0", "Main Radio Control State Machine configuration"),
    reg(0x19, "FOCCFG", "Frequency Offset Compensation configuration"),
    reg(0x1A, "BSCFG", "Bit Synchronization configuration"),
    reg(0x1B, "AGCCTRL2", "AGC control"),
    reg(0x1C, "AGCCTRL1", "AGC control"),
    reg(0x1D, "AGCCTRL0", "AGC control"),
    reg(0x1E, "WOREVT1", "High byte Event 0 timeout"),
    reg(0x1F, "WOREVT0", "Low byte Event 0 timeout"),
    reg(0x20, "WORCTRL", "Wake On Radio control"),
    reg(0x21, "FREND1", "Front end RX configuration"),
    reg(0x22, "FREND0", "Front end TX configuration"),
    reg(0x23, "FSCAL3", "Frequency synthesizer calibration"),
    reg(0x24, "FSCAL2", "Frequency synthesizer calibration"),
    reg(0x25, "FSCAL1", "Frequency synthesizer calibration"),
    reg(0x26, "FSCAL0", "Frequency synthesizer calibration"),
    reg(0x27, "RCCTRL1", "RC oscillator configuration"),
    reg(0x28, "RCCTRL0", "RC oscillator configuration"),
    reg(0x29, "FSTEST", "Frequency synthesizer calibration control"),
    reg(0x2A, "PTEST", "Production test"),
    reg(0x2B, "AGCTEST", "AGC test"),
    reg(0x2C, "TEST2", "Various test settings"),
    reg(0x2D, "TEST1", "Various test settings"),
    reg(0x2E, "TEST0", "Various test settings"),
];

/// Command strobes 0x30-0x3D (Table 42). 0x37 is reserved, so the range
/// is not dense.
pub static COMMAND_STROBES: [RegisterInfo; 13] = [
    reg(0x30, "SRES", "Reset chip."),
    reg(
        0x31,
        "SFSTXON",
        "Enable and calibrate frequency synthesizer (if MCSM0.FS_AUTOCAL=1). If in RX (with CCA): \
         Go to a wait state where only the synthesizer is running (for quick RX / TX turnaround).",
    ),
    reg(0x32, "SXOFF", "Turn off crystal oscillator."),
    reg(
        0x33,
        "SCAL",
        "Calibrate frequency synthesizer and turn it off. SCAL can be strobed from IDLE mode \
         without setting manual calibration mode (MCSM0.FS_AUTOCAL=0)",
    ),
    reg(
        0x34,
        "SRX",
        "Enable RX. Perform calibration first if coming from IDLE and MCSM0.FS_AUTOCAL=1.",
    ),
    reg(
        0x35,
        "STX",
        "In IDLE state: Enable TX. Perform calibration first if MCSM0.FS_AUTOCAL=1. If in RX state \
         and CCA is enabled: Only go to TX if channel is clear.",
    ),
    reg(
        0x36,
        "SIDLE",
        "Exit RX / TX, turn off frequency synthesizer and exit Wake-On-Radio mode if applicable.",
    ),
    reg(
        0x38,
        "SWOR",
        "Start automatic RX polling sequence (Wake-on-Radio) as described in Section 19.5 if \
         WORCTRL.RC_PD=0.",
    ),
    reg(0x39, "SPWD", "Enter power down mode when CSn goes high."),
    reg(
        0x3A,
        "SFRX",
        "Flush the RX FIFO buffer. Only issue SFRX in IDLE or RXFIFO_OVERFLOW states.",
    ),
    reg(
        0x3B,
        "SFTX",
        "Flush the TX FIFO buffer. Only issue SFTX in IDLE or TXFIFO_UNDERFLOW states.",
    ),
    reg(0x3C, "SWORRST", "Reset real time clock to Event1 value."),
    reg(
        0x3D,
        "SNOP",
        "No operation. May be used to get access to the chip status byte.",
    ),
];

/// Status registers 0x30-0x3D (Table 44), selected by a read+burst
/// header byte.
pub static STATUS_REGISTERS: [RegisterInfo; 14] = [
    reg(0x30, "PARTNUM", "Part number for CC1101"),
    reg(0x31, "VERSION", "Current version number"),
    reg(0x32, "FREQEST", "Frequency Offset Estimate"),
    reg(0x33, "LQI", "Demodulator estimate for Link Quality"),
    reg(0x34, "RSSI", "Received signal strength indication"),
    reg(0x35, "MARCSTATE", "Control state machine state"),
    reg(0x36, "WORTIME1", "High byte of WOR timer"),
    reg(0x37, "WORTIME0", "Low byte of WOR timer"),
    reg(0x38, "PKTSTATUS", "Current GDOx status and packet status"),
    reg(0x39, "VCO_VC_DAC", "Current setting from PLL calibration module"),
    reg(0x3A, "TXBYTES", "Underflow and number of bytes in the TX FIFO"),
    reg(0x3B, "RXBYTES", "Overflow and number of bytes in the RX FIFO"),
    reg(0x3C, "RCCTRL1_STATUS", "Last RC oscillator calibration result"),
    reg(0x3D, "RCCTRL0_STATUS", "Last RC oscillator calibration result"),
];

/// Multi-byte registers: the PA table and the shared TX/RX FIFO address.
pub static MULTI_BYTE_REGISTERS: [RegisterInfo; 2] = [
    reg(0x3E, "PATABLE", "PA Table"),
    reg(0x3F, "TX/RX FIFO", "Tx / Rx FIFO"),
];

/// Main radio control FSM states (MARC_STATE[4:0], Figure 25). Dense:
/// the entry for code `c` sits at index `c`.
///
/// SLEEP and XOFF can never be read back over SPI — pulling CSn low
/// wakes the chip into IDLE first — but the codes are documented and
/// kept for completeness.
pub static MARC_STATES: [MarcStateInfo; 23] = [
    marc(0x00, "SLEEP", "SLEEP"),
    marc(0x01, "IDLE", "IDLE"),
    marc(0x02, "XOFF", "XOFF"),
    marc(0x03, "VCOON_MC", "MANCAL"),
    marc(0x04, "REGON_MC", "MANCAL"),
    marc(0x05, "MANCAL", "MANCAL"),
    marc(0x06, "VCOON", "FS_WAKEUP"),
    marc(0x07, "REGON", "FS_WAKEUP"),
    marc(0x08, "STARTCAL", "CALIBRATE"),
    marc(0x09, "BWBOOST", "SETTLING"),
    marc(0x0A, "FS_LOCK", "SETTLING"),
    marc(0x0B, "IFADCON", "SETTLING"),
    marc(0x0C, "ENDCAL", "CALIBRATE"),
    marc(0x0D, "RX", "RX"),
    marc(0x0E, "RX_END", "RX"),
    marc(0x0F, "RX_RST", "RX"),
    marc(0x10, "TXRX_SWITCH", "TXRX_SETTLING"),
    marc(0x11, "RXFIFO_OVERFLOW", "RXFIFO_OVERFLOW"),
    marc(0x12, "FSTXON", "FSTXON"),
    marc(0x13, "TX", "TX"),
    marc(0x14, "TX_END", "TX"),
    marc(0x15, "RXTX_SWITCH", "RXTX_SETTLING"),
    marc(0x16, "TXFIFO_UNDERFLOW", "TXFIFO_UNDERFLOW"),
];

/// Look up a configuration register. Valid domain: 0x00-0x2E.
pub fn config_register(address: u8) -> Option<&'static RegisterInfo> {
    CONFIG_REGISTERS.get(address as usize)
}

/// Look up a command strobe. Valid domain: 0x30-0x3D except 0x37.
pub fn command_strobe(address: u8) -> Option<&'static RegisterInfo> {
    COMMAND_STROBES.iter().find(|r| r.address == address)
}

/// Look up a status register. Valid domain: 0x30-0x3D.
pub fn status_register(address: u8) -> Option<&'static RegisterInfo> {
    STATUS_REGISTERS.iter().find(|r| r.address == address)
}

/// Look up a multi-byte register. Valid domain: 0x3E-0x3F.
pub fn multi_byte_register(address: u8) -> Option<&'static RegisterInfo> {
    MULTI_BYTE_REGISTERS.iter().find(|r| r.address == address)
}

/// Look up a main radio control FSM state code. Valid domain: 0x00-0x16.
pub fn marc_state(code: u8) -> Option<&'static MarcStateInfo> {
    MARC_STATES.get(code as usize)
}
