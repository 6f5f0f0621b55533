//! Example: decode a synthetic CC1101 capture
//!
//! Builds a small bus-event trace (a chip bring-up: reset strobe,
//! frequency word, PA table, RX, status polls, FIFO read) and runs it
//! through the stream decoder, logging every record.
//!
//! Usage:
//!   cargo run --example decode_trace
//!   cargo run --example decode_trace -- --repeat 3 --inject-errors

use clap::Parser;
use crossbeam_channel::bounded;
use tracing::info;

use cc1101_analyzer::{BusEvent, Record, StreamDecoder};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of times to repeat the synthetic trace
    #[arg(short, long, default_value = "1")]
    repeat: usize,

    /// Inject framing violations into the trace
    #[arg(long)]
    inject_errors: bool,
}

/// Append one chip-select window clocking the given byte pairs.
fn push_transaction(trace: &mut Vec<BusEvent>, t: &mut u64, bytes: &[(u8, u8)]) {
    trace.push(BusEvent::enable_asserted(*t));
    *t += 10;
    for &(mosi, miso) in bytes {
        trace.push(BusEvent::byte_exchanged(mosi, miso, *t, *t + 80));
        *t += 80;
    }
    trace.push(BusEvent::enable_deasserted(*t + 10));
    *t += 100;
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut trace = Vec::new();
    let mut t = 0u64;
    for _ in 0..args.repeat {
        // Reset, then a typical bring-up sequence ending in RX
        push_transaction(&mut trace, &mut t, &[(0x30, 0x0F)]); // SRES
        push_transaction(&mut trace, &mut t, &[(0x0D, 0x0F), (0x10, 0x0F)]); // FREQ2 <- 0x10
        push_transaction(&mut trace, &mut t, &[(0x7E, 0x0F), (0xC0, 0x0F)]); // PATABLE burst write
        push_transaction(&mut trace, &mut t, &[(0x34, 0x0F)]); // SRX
        push_transaction(&mut trace, &mut t, &[(0xF5, 0x1F), (0x00, 0x0D)]); // MARCSTATE -> RX
        push_transaction(
            &mut trace,
            &mut t,
            &[(0xFF, 0x1F), (0x00, 0xAA), (0x00, 0xBB)], // RX FIFO burst read
        );
        if args.inject_errors {
            trace.push(BusEvent::bus_error(t, t + 5));
            t += 20;
            trace.push(BusEvent::enable_asserted(t));
            trace.push(BusEvent::enable_deasserted(t + 5)); // no SPI frame
            t += 20;
        }
    }

    let (event_tx, event_rx) = bounded(trace.len());
    let (record_tx, record_rx) = bounded::<Record>(trace.len());
    for event in trace {
        event_tx.send(event)?;
    }
    drop(event_tx);

    let mut decoder = StreamDecoder::new();
    let forwarded = decoder.run(&event_rx, &record_tx)?;
    drop(record_tx);

    info!("decoded {} records", forwarded);
    for record in record_rx.iter() {
        info!(
            "[{:>6}..{:>6}] {:<14} {}",
            record.start_time,
            record.end_time,
            record.kind.to_string(),
            record.summary()
        );
    }

    Ok(())
}
