use std::net::Ipv4Addr;
use std::sync::Once;
use std::time::{Duration, Instant};

use more_asserts as ma;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ping_once::{probe, ProbeConfig, ProbeError, SequenceNumber};

static SETUP: Once = Once::new();

fn setup() {
    SETUP.call_once(|| {
        let subscriber = FmtSubscriber::builder().with_max_level(Level::ERROR).finish();
        tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
    });
}

/*
* Note: Raw sockets work only with root privileges.
*/
#[test]
fn probe_to_localhost_reports_rtt_and_ttl() {
    setup();

    let config = ProbeConfig {
        target: Ipv4Addr::new(127, 0, 0, 1),
        identifier: 0x5A5A,
        sequence: SequenceNumber(1),
        timeout: Duration::from_secs(1),
    };

    let report = probe(&config).unwrap();

    ma::assert_gt!(u8::from(report.ttl), 0);
    ma::assert_gt!(report.rtt, Duration::from_secs(0));
    ma::assert_lt!(report.rtt, Duration::from_secs(1));
}

#[test]
fn probe_matches_the_configured_sequence_number() {
    setup();

    // The loopback reply echoes identifier and sequence back; a byte-order
    // slip in either field would time this probe out.
    let config = ProbeConfig {
        target: Ipv4Addr::new(127, 0, 0, 1),
        identifier: 0x0102,
        sequence: SequenceNumber(4242),
        timeout: Duration::from_secs(1),
    };

    assert!(probe(&config).is_ok());
}

#[test]
fn probe_to_a_blackhole_times_out_on_schedule() {
    setup();

    // TEST-NET-1 is reserved for documentation; nothing answers there.
    let config = ProbeConfig {
        target: Ipv4Addr::new(192, 0, 2, 1),
        identifier: 0x5A5A,
        sequence: SequenceNumber(1),
        timeout: Duration::from_millis(200),
    };
    let before = Instant::now();

    let result = probe(&config);
    let elapsed = before.elapsed();

    assert!(matches!(result, Err(ProbeError::TimedOut)));
    ma::assert_ge!(elapsed, Duration::from_millis(200));
    ma::assert_lt!(elapsed, Duration::from_millis(1200));
}
