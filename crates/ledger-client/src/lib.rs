//! Client for the remote depreciation service.
//!
//! [`AssetService`] is the seam the rest of the workspace talks to;
//! [`HttpAssetClient`] is its HTTP/JSON implementation.

pub mod client;
pub mod config;
pub mod dto;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod traits;

pub use client::HttpAssetClient;
pub use config::ServiceConfig;
pub use error::ClientError;
pub use traits::AssetService;

pub use dto::*;
