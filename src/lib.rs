#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub use error::{ProbeError, ProbeResult};
pub use icmp::v4::{SequenceNumber, Ttl};
pub use probe::{probe, ProbeConfig, ProbeReport};
pub use resolve::resolve_ipv4;

mod deadline;
mod error;
mod icmp;
mod probe;
mod resolve;
