// Session configuration
//
// Connection defaults, timeouts, and the rate thresholds used by the
// link-quality indicator.

use std::time::Duration;

/// Host used when no positional argument is given
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port used when no positional argument is given
pub const DEFAULT_PORT: u16 = 65432;

/// Bound on the initial TCP connect
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Short polling read timeout once streaming; a timeout is the expected
/// idle case and simply hands control back to the session loop
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Receive chunk size in bytes
pub const RECV_CHUNK_SIZE: usize = 1024;

/// Number of arrival timestamps kept for rate estimation
pub const RATE_HISTORY_LEN: usize = 50;

/// Rate above which the link is reported as excellent (records/second)
pub const RATE_EXCELLENT_HZ: f64 = 30.0;

/// Rate above which the link is reported as good (records/second)
pub const RATE_GOOD_HZ: f64 = 10.0;
