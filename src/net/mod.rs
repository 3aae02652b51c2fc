// TCP connection management
//
// Opens the single client connection and classifies reads for the session
// loop. There is no reconnection logic anywhere: a closed or failed socket
// ends the session.

use crate::app::config::{CONNECT_TIMEOUT, READ_TIMEOUT};
use std::io::{self, Read};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use thiserror::Error;

/// Errors raised while establishing or reading the telemetry connection
#[derive(Debug, Error)]
pub enum NetError {
    #[error("cannot resolve {addr}: {source}")]
    Resolve { addr: String, source: io::Error },

    #[error("no address found for {addr}")]
    NoAddress { addr: String },

    #[error("failed to connect to {addr}: {source}")]
    Connect { addr: SocketAddr, source: io::Error },

    #[error("socket read failed: {0}")]
    Read(#[from] io::Error),
}

/// Outcome of one polling read on the telemetry socket
#[derive(Debug)]
pub enum ReadOutcome {
    /// `n` bytes landed at the front of the chunk buffer
    Data(usize),
    /// The read timed out; expected while the server is quiet
    Idle,
    /// Zero-length read: the peer closed the connection
    Closed,
}

/// Connect to the telemetry server
///
/// The connect itself is bounded by [`CONNECT_TIMEOUT`]; once established
/// the socket is switched to the short [`READ_TIMEOUT`] so the session loop
/// stays responsive without busy-waiting.
pub fn connect(host: &str, port: u16) -> Result<TcpStream, NetError> {
    let addr_str = format!("{host}:{port}");
    let addr = addr_str
        .to_socket_addrs()
        .map_err(|source| NetError::Resolve {
            addr: addr_str.clone(),
            source,
        })?
        .next()
        .ok_or(NetError::NoAddress { addr: addr_str })?;

    tracing::debug!(%addr, "connecting");
    let stream =
        TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT).map_err(|source| NetError::Connect {
            addr,
            source,
        })?;
    stream.set_read_timeout(Some(READ_TIMEOUT))?;
    tracing::info!(%addr, "connected");
    Ok(stream)
}

/// Perform one bounded read and classify the result
///
/// `WouldBlock` and `TimedOut` both map to [`ReadOutcome::Idle`] (the
/// timeout error kind differs across platforms); `Interrupted` is retried
/// as idle. Anything else is a real socket failure.
pub fn read_chunk(stream: &mut TcpStream, buf: &mut [u8]) -> Result<ReadOutcome, NetError> {
    match stream.read(buf) {
        Ok(0) => Ok(ReadOutcome::Closed),
        Ok(n) => Ok(ReadOutcome::Data(n)),
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
            ) =>
        {
            Ok(ReadOutcome::Idle)
        }
        Err(e) => Err(NetError::Read(e)),
    }
}
