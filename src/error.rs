use std::error::Error;
use std::fmt;
use std::io;

pub type ProbeResult<T> = Result<T, ProbeError>;

/// Terminal failure of one probe.
///
/// Non-matching or malformed datagrams are not failures; the session
/// discards them and keeps waiting until the deadline.
#[derive(Debug)]
pub enum ProbeError {
    InvalidArgument { message: String },
    ResolveFailed { host: String, source: Option<io::Error> },
    SocketCreateFailed { source: io::Error },
    SendFailed { source: io::Error },
    WaitFailed { source: io::Error },
    ReceiveFailed { source: io::Error },
    TimedOut,
}

impl ProbeError {
    /// Process exit code for the CLI, distinct per kind so callers can tell
    /// failures apart without parsing stderr. Code 1 is left to the argument
    /// parser for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeError::InvalidArgument { .. } => 2,
            ProbeError::ResolveFailed { .. } => 3,
            ProbeError::SocketCreateFailed { .. } => 4,
            ProbeError::SendFailed { .. } => 5,
            ProbeError::WaitFailed { .. } => 6,
            ProbeError::TimedOut => 7,
            ProbeError::ReceiveFailed { .. } => 8,
        }
    }

    /// A hint the CLI prints under the error message, where one helps.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            ProbeError::SocketCreateFailed { .. } => {
                Some("this program requires the cap_net_raw capability or root privileges")
            }
            _ => None,
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ProbeError::InvalidArgument { message } => write!(f, "{message}"),
            ProbeError::ResolveFailed { host, source } => {
                write!(f, "cannot resolve host {host}")?;
                if let Some(source) = source {
                    write!(f, ": {source}")?;
                }
                Ok(())
            }
            ProbeError::SocketCreateFailed { source } => {
                write!(f, "cannot create raw icmp socket: {source}")
            }
            ProbeError::SendFailed { source } => write!(f, "cannot send echo request: {source}"),
            ProbeError::WaitFailed { source } => {
                write!(f, "cannot arm the receive timeout: {source}")
            }
            ProbeError::ReceiveFailed { source } => write!(f, "cannot receive reply: {source}"),
            ProbeError::TimedOut => write!(f, "no matching echo reply within the timeout"),
        }
    }
}

impl Error for ProbeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProbeError::ResolveFailed { source, .. } => {
                source.as_ref().map(|error| error as &(dyn Error + 'static))
            }
            ProbeError::SocketCreateFailed { source }
            | ProbeError::SendFailed { source }
            | ProbeError::WaitFailed { source }
            | ProbeError::ReceiveFailed { source } => Some(source),
            ProbeError::InvalidArgument { .. } | ProbeError::TimedOut => None,
        }
    }
}
