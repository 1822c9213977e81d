//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::USER_AGENT;
use crate::error_handling::InitializationError;

/// Connection establishment timeout. Check deadlines are owned by the
/// individual probes, so the client itself carries no request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum redirect hops when resolving a stream URL.
const MAX_REDIRECT_HOPS: usize = 10;

/// Builds the shared HTTP client used by both probes.
///
/// Redirect following is enabled: stream directories are full of
/// listen-page URLs that 302 to the actual mount point.
pub fn init_client() -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;
    Ok(client)
}
