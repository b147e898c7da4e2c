//! Client for the S-box analysis service.
//!
//! The service builds S-boxes from affine matrices, computes their
//! cryptographic metrics, exports reports and runs AES over text and images.
//! This crate owns the request/response contract; it never computes any of
//! those things itself.
//!
//! - [`SboxApi`]: the operations, as an async trait the workflow is generic over
//! - [`ApiClient`]: the `reqwest` implementation
//! - [`ClientError`]: transport, status and decoding failures, with the
//!   service's own error message extracted from the body
//!
//! # Example
//!
//! ```no_run
//! use sbx_client::{ApiClient, ClientConfig, SboxApi};
//!
//! async fn catalogue() -> sbx_client::Result<()> {
//!     let client = ApiClient::new(&ClientConfig::default())?;
//!     for entry in client.list_artifacts().await? {
//!         println!("{} ({})", entry.name, entry.id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;

pub use api::{
    ApiClient, CipherOutput, CipherRequest, DownloadedFile, ExportRequest, ExportSource,
    ImageCipherRequest, ImageUpload, RemoteValidation, SboxApi, extract_error_message,
};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};
