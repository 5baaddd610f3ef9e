//! Application layer: services and use cases
//!
//! This layer loads trees from disk and orchestrates domain operations.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::WalkResultExt;
