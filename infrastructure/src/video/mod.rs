//! Video metadata sources
//!
//! - [`OEmbedVideoSource`] queries the public YouTube oEmbed endpoint
//! - [`OfflineVideoSource`] derives stable placeholder metadata for `--mock` runs

mod oembed;
mod offline;

pub use oembed::OEmbedVideoSource;
pub use offline::OfflineVideoSource;
