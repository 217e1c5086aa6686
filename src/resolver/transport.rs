//! UDP query transport.
//!
//! One socket per query, never shared across concurrent calls. A fixed
//! number of send attempts reuse the same request bytes (and therefore the
//! same transaction ID); within each attempt's timeout window, datagrams
//! carrying the wrong transaction ID are discarded and the socket keeps
//! listening, so off-path noise cannot be mistaken for the answer.

use std::net::SocketAddr;
use std::time::Duration;

use log::debug;
use tokio::net::UdpSocket;
use tokio::time::{timeout, Instant};

use crate::resolver::error::ResolveError;

/// Receive buffer size. Larger than the 512-byte classic UDP limit to
/// accommodate servers that send bigger payloads without EDNS negotiation.
const MAX_UDP_PAYLOAD: usize = 4096;

/// Sends `request` to `server` and waits for a datagram whose first two
/// bytes match `expected_id`.
///
/// Makes up to `attempts` sends (2 by policy), each with its own `timeout`
/// window. Returns the raw response bytes for the parser.
///
/// # Errors
///
/// * `Timeout`: no matching datagram arrived across all attempts.
/// * `NetworkError`: bind/send/receive failed at the socket level
///   (unreachable network, refused port).
pub async fn query(
    server: SocketAddr,
    request: &[u8],
    window: Duration,
    attempts: u32,
) -> Result<Vec<u8>, ResolveError> {
    let bind_addr: SocketAddr = if server.is_ipv4() {
        "0.0.0.0:0".parse().expect("literal address")
    } else {
        "[::]:0".parse().expect("literal address")
    };
    let socket = UdpSocket::bind(bind_addr).await?;
    socket.connect(server).await?;

    let expected_id = match request {
        [hi, lo, ..] => u16::from_be_bytes([*hi, *lo]),
        _ => 0,
    };

    for attempt in 1..=attempts {
        socket.send(request).await?;
        let deadline = Instant::now() + window;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            let mut buf = vec![0u8; MAX_UDP_PAYLOAD];
            match timeout(remaining, socket.recv(&mut buf)).await {
                Err(_) => break, // window for this attempt elapsed
                Ok(Err(e)) => return Err(ResolveError::NetworkError(e)),
                Ok(Ok(len)) => {
                    if len < 2 {
                        debug!("discarding {len}-byte datagram from {server}: too short for an ID");
                        continue;
                    }
                    let id = u16::from_be_bytes([buf[0], buf[1]]);
                    if id != expected_id {
                        debug!(
                            "discarding datagram from {server} with id {id:#06x}, expected {expected_id:#06x}"
                        );
                        continue;
                    }
                    buf.truncate(len);
                    return Ok(buf);
                }
            }
        }

        if attempt < attempts {
            debug!("no response from {server} within {window:?}, retrying (attempt {attempt} of {attempts})");
        }
    }

    Err(ResolveError::Timeout { attempts })
}
