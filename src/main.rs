use std::process;
use std::time::Duration;

use ping_once::{
    probe, resolve_ipv4, ProbeConfig, ProbeError, ProbeReport, ProbeResult, SequenceNumber,
};

const MIN_TIMEOUT_MS: u64 = 1;
const MAX_TIMEOUT_MS: u64 = 60_000;

#[derive(argh::FromArgs)]
/// ping-once - send one ICMP echo request and report the round-trip time
struct Args {
    #[argh(positional)]
    /// hostname or IPv4 address to probe
    host: String,

    #[argh(option, short = 't', default = "1000")]
    /// give up after this many milliseconds (1 to 60000)
    timeout_ms: u64,

    #[argh(option, short = 's', default = "u16::from(SequenceNumber::START)")]
    /// sequence number to send
    sequence: u16,

    #[argh(switch, short = 'v')]
    /// log the probe internals to stderr
    verbose: bool,
}

fn main() {
    let args: Args = argh::from_env();

    let level = if args.verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::WARN
    };
    // Stdout is reserved for the result line; all logging goes to stderr.
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match run(&args) {
        Ok(report) => {
            println!(
                "rtt_ms={:.3} ttl={}",
                report.rtt.as_secs_f64() * 1000.0,
                report.ttl
            );
        }
        Err(error) => {
            eprintln!("Error: {error}");
            if let Some(hint) = error.remediation() {
                eprintln!("Note: {hint}");
            }
            process::exit(error.exit_code());
        }
    }
}

fn run(args: &Args) -> ProbeResult<ProbeReport> {
    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&args.timeout_ms) {
        return Err(ProbeError::InvalidArgument {
            message: format!("timeout-ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"),
        });
    }
    let target = resolve_ipv4(&args.host)?;
    let config = ProbeConfig {
        target,
        identifier: (process::id() & 0xffff) as u16,
        sequence: SequenceNumber::from(args.sequence),
        timeout: Duration::from_millis(args.timeout_ms),
    };
    probe(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The unresolvable host keeps an in-bounds run away from the raw socket.
    fn args_with_timeout(timeout_ms: u64) -> Args {
        Args {
            host: "host.invalid.".to_string(),
            timeout_ms,
            sequence: 1,
            verbose: false,
        }
    }

    #[test]
    fn an_out_of_range_timeout_is_rejected_before_resolving() {
        for timeout_ms in [0, MAX_TIMEOUT_MS + 1] {
            let result = run(&args_with_timeout(timeout_ms));

            assert!(matches!(result, Err(ProbeError::InvalidArgument { .. })));
        }
    }

    #[test]
    fn the_timeout_bounds_are_inclusive() {
        for timeout_ms in [MIN_TIMEOUT_MS, MAX_TIMEOUT_MS] {
            let result = run(&args_with_timeout(timeout_ms));

            assert!(matches!(result, Err(ProbeError::ResolveFailed { .. })));
        }
    }
}
