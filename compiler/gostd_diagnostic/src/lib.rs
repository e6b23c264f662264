//! Diagnostics for the gostd binding generator.
//!
//! Two failure families live here:
//!
//! - **Sentinels** ([`Sentinel`], [`SentinelCode`]): recoverable, local
//!   translation failures. They are carried as typed values through the
//!   translator and only serialized to an embeddable `ABENDnnn(...)` token
//!   when generated text is emitted. Text can be scanned back into a
//!   [`SentinelTally`] for batch reporting.
//! - **Fatal errors** ([`BindError`]): malformed input or a violated
//!   internal invariant. Continuing would produce silently wrong output, so
//!   these abort the batch.

mod error;
mod sentinel;
mod tally;

pub use error::BindError;
pub use sentinel::{contains_sentinel, scan, Sentinel, SentinelCode, SENTINEL_PREFIX};
pub use tally::SentinelTally;
