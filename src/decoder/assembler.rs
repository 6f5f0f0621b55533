//! Transaction framing state machine
//!
//! Consumes one bus event at a time in chronological order, accumulates
//! the byte pairs clocked during one chip-select assertion, and emits
//! exactly one record per completed transaction or framing violation.
//!
//! The machine always drains back to `Idle` in the same call that
//! reaches `End` or `Error`, so malformed input can never wedge it —
//! that self-healing property is the correctness requirement of this
//! layer.

use tracing::{debug, trace};

use super::event::{BusEvent, BusEventKind};
use super::record::Record;
use crate::protocol::{ByteExchange, CatalogError, interpret};

/// Detail text for clock/enable framing violations.
const BUS_ERROR_DETAILS: &str = "clock in wrong state when enable signal became active";
/// Detail text for an enable window with no clocked bytes.
const NO_FRAME_DETAILS: &str = "no SPI frame";

/// Framing states. `End` and `Error` are transient: they drain back to
/// `Idle` before `process` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    Idle,
    Start,
    Active,
    End,
    Error,
}

/// Chip-select transaction assembler.
///
/// One instance per capture session. The byte queue and time span are
/// owned exclusively by the instance and reset at every `Idle`
/// re-entry, so nothing leaks from one transaction into the next.
pub struct TransactionAssembler {
    name: String,
    state: FrameState,
    queue: Vec<ByteExchange>,
    start_time: u64,
    end_time: u64,
    /// Completed-transaction counter for log output.
    tx_count: u64,
}

impl TransactionAssembler {
    /// Create an assembler in the `Idle` state.
    pub fn new() -> Self {
        Self {
            name: "cc1101".to_string(),
            state: FrameState::Idle,
            queue: Vec::new(),
            start_time: 0,
            end_time: 0,
            tx_count: 0,
        }
    }

    /// With custom name (used in log output).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Completed transactions decoded so far.
    pub fn transactions_decoded(&self) -> u64 {
        self.tx_count
    }

    /// Feed one event; returns the record it completes, if any.
    ///
    /// Framing violations come back as `spi error` records, not as
    /// `Err` — the only error is a fatal [`CatalogError`] from the
    /// interpreter, which indicates a defect in the static tables
    /// rather than bad bus traffic.
    pub fn process(&mut self, event: BusEvent) -> Result<Option<Record>, CatalogError> {
        let mut output = None;

        // A bus error preempts whatever state we are in. The violation
        // record spans the error event itself, which is the only span
        // that is well-defined in every state.
        if event.kind == BusEventKind::BusError {
            trace!("[{}] bus error at t={}", self.name, event.start_time);
            self.state = FrameState::Error;
            output = Some(Record::spi_error(
                BUS_ERROR_DETAILS,
                event.start_time,
                event.end_time,
            ));
        }

        match self.state {
            FrameState::Idle => match event.kind {
                BusEventKind::EnableAsserted => {
                    self.start_time = event.start_time;
                    self.state = FrameState::Start;
                }
                _ => self.state = FrameState::Error,
            },
            FrameState::Start => match event.kind {
                BusEventKind::ByteExchanged { .. } => {
                    // The reported span runs from the first byte to the
                    // last byte, not from the enable edge.
                    self.start_time = event.start_time;
                    self.end_time = event.end_time;
                    self.state = FrameState::Active;
                }
                BusEventKind::EnableDeasserted => {
                    self.end_time = event.end_time;
                    self.state = FrameState::Error;
                    output = Some(Record::spi_error(
                        NO_FRAME_DETAILS,
                        self.start_time,
                        self.end_time,
                    ));
                }
                _ => self.state = FrameState::Error,
            },
            FrameState::Active => match event.kind {
                BusEventKind::ByteExchanged { .. } => self.end_time = event.end_time,
                BusEventKind::EnableDeasserted => self.state = FrameState::End,
                _ => self.state = FrameState::Error,
            },
            // Only reachable for the bus-error event handled above.
            FrameState::End | FrameState::Error => {}
        }

        if self.state == FrameState::Active {
            if let BusEventKind::ByteExchanged { mosi, miso } = event.kind {
                trace!(
                    "[{}] byte ({:02X}, {:02X}) at t={}",
                    self.name, mosi, miso, event.start_time
                );
                self.queue.push(ByteExchange { mosi, miso });
            }
        }

        if self.state == FrameState::End {
            let frame = std::mem::take(&mut self.queue);
            let (start_time, end_time) = (self.start_time, self.end_time);
            self.reset();
            if !frame.is_empty() {
                let message = interpret(&frame)?;
                let record = Record::from_message(&frame, &message, start_time, end_time)?;
                self.tx_count += 1;
                debug!("[{}] #{}: {}", self.name, self.tx_count, record.summary());
                output = Some(record);
            }
        } else if self.state == FrameState::Error {
            self.reset();
        }

        Ok(output)
    }

    /// Re-enter `Idle` with no carried-over state.
    fn reset(&mut self) {
        self.queue.clear();
        self.start_time = 0;
        self.end_time = 0;
        self.state = FrameState::Idle;
    }
}

impl Default for TransactionAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::record::RecordKind;

    /// Feed a whole event sequence, collecting emitted records.
    fn run(assembler: &mut TransactionAssembler, events: &[BusEvent]) -> Vec<Record> {
        events
            .iter()
            .filter_map(|&event| assembler.process(event).unwrap())
            .collect()
    }

    fn write_transaction(t0: u64, bytes: &[u8]) -> Vec<BusEvent> {
        let mut events = vec![BusEvent::enable_asserted(t0)];
        let mut t = t0 + 10;
        for &mosi in bytes {
            events.push(BusEvent::byte_exchanged(mosi, 0x0F, t, t + 80));
            t += 80;
        }
        events.push(BusEvent::enable_deasserted(t + 10));
        events
    }

    #[test]
    fn test_single_transaction_emits_one_record() {
        let mut assembler = TransactionAssembler::new();
        let records = run(&mut assembler, &write_transaction(0, &[0x0D, 0x5C]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Register);
        assert_eq!(records[0].summary(), "Register: W | FREQ2 = 5C");
        // Span runs from the first byte start to the last byte end
        assert_eq!(records[0].start_time, 10);
        assert_eq!(records[0].end_time, 170);
        assert_eq!(assembler.transactions_decoded(), 1);
    }

    #[test]
    fn test_empty_enable_window_emits_error_record() {
        let mut assembler = TransactionAssembler::new();
        let records = run(
            &mut assembler,
            &[
                BusEvent::enable_asserted(100),
                BusEvent::enable_deasserted(140),
            ],
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::SpiError);
        assert_eq!(records[0].fields.error_details, "no SPI frame");
        assert_eq!(records[0].start_time, 100);
        assert_eq!(records[0].end_time, 140);
        assert_eq!(assembler.transactions_decoded(), 0);
    }

    #[test]
    fn test_stray_byte_in_idle_recovers_silently() {
        let mut assembler = TransactionAssembler::new();
        // A byte with no enable produces no output at all...
        assert_eq!(
            assembler
                .process(BusEvent::byte_exchanged(0x30, 0x0F, 0, 80))
                .unwrap(),
            None
        );
        // ...and the next well-formed transaction still decodes.
        let records = run(&mut assembler, &write_transaction(100, &[0x30]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].summary(), "Command: SRES");
    }

    #[test]
    fn test_bus_error_emits_record_with_event_span() {
        let mut assembler = TransactionAssembler::new();
        let records = run(&mut assembler, &[BusEvent::bus_error(7, 9)]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::SpiError);
        assert_eq!(
            records[0].fields.error_details,
            "clock in wrong state when enable signal became active"
        );
        assert_eq!(records[0].start_time, 7);
        assert_eq!(records[0].end_time, 9);
    }

    #[test]
    fn test_bus_error_mid_transaction_drops_queued_bytes() {
        let mut assembler = TransactionAssembler::new();
        let mut events = vec![
            BusEvent::enable_asserted(0),
            BusEvent::byte_exchanged(0x0D, 0x0F, 10, 90),
            BusEvent::bus_error(95, 96),
        ];
        events.extend(write_transaction(200, &[0x3D]));
        let records = run(&mut assembler, &events);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, RecordKind::SpiError);
        // The aborted transaction's bytes must not leak into this one
        assert_eq!(records[1].kind, RecordKind::Command);
        assert_eq!(records[1].fields.raw_data, "[(3D, 0F)]");
    }

    #[test]
    fn test_double_enable_recovers() {
        let mut assembler = TransactionAssembler::new();
        let mut events = vec![
            BusEvent::enable_asserted(0),
            BusEvent::enable_asserted(5),
        ];
        events.extend(write_transaction(100, &[0x0D, 0x5C]));
        let records = run(&mut assembler, &events);

        // The duplicate enable errors silently; the next transaction
        // decodes normally.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Register);
    }

    #[test]
    fn test_back_to_back_transactions() {
        let mut assembler = TransactionAssembler::new();
        let mut events = write_transaction(0, &[0x30]);
        events.extend(write_transaction(1_000, &[0x0D, 0x5C]));
        events.extend(write_transaction(2_000, &[0x7E, 0xC0]));
        let records = run(&mut assembler, &events);

        let summaries: Vec<String> = records.iter().map(Record::summary).collect();
        assert_eq!(
            summaries,
            [
                "Command: SRES",
                "Register: W | FREQ2 = 5C",
                "PA Table: W = C0",
            ]
        );
        assert_eq!(assembler.transactions_decoded(), 3);
    }

    #[test]
    fn test_status_read_transaction() {
        let mut assembler = TransactionAssembler::new();
        let records = run(
            &mut assembler,
            &[
                BusEvent::enable_asserted(0),
                BusEvent::byte_exchanged(0xF5, 0x1F, 10, 90),
                BusEvent::byte_exchanged(0x00, 0x0D, 90, 170),
                BusEvent::enable_deasserted(180),
            ],
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Status);
        assert_eq!(records[0].summary(), "Status: MARCSTATE = RX");
        assert_eq!(records[0].fields.state, "RX");
        assert_eq!(records[0].fields.fifo_bytes_available, "15");
    }
}
