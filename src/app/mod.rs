//! Application-level plumbing: logger setup and user-facing output.

mod logging;

pub use logging::init_logger_with;

use rustls::crypto::{ring::default_provider, CryptoProvider};

/// Installs the process-wide rustls crypto provider.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_crypto_provider() {
    let _ = CryptoProvider::install_default(default_provider());
}
