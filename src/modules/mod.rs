//! Scanning modules.
//!
//! Every module here is a thin client over an existing protocol stack or
//! HTTP API; the one substantial dependency they share is the crate's own
//! DNS engine in [`crate::resolver`]. Each module returns a serializable
//! finding struct, and a failure in one module is recorded in the report
//! without aborting the others.

pub mod dns_recon;
pub mod headers;
pub mod ports;
pub mod subdomains;
pub mod tech;
pub mod tls;
pub mod wayback;
