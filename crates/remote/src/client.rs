use std::time::Duration;

use once_cell::sync::Lazy;

/// Shared HTTP client with connection pooling. Both collaborators go through
/// this one; per-request clients would re-handshake on every call.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(16)
        .build()
        .expect("Failed to build HTTP client")
});
