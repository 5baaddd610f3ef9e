//! Domain layer: the virtual route tree and its algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod display;
pub mod entities;
pub mod error;
pub mod layout;
pub mod lookup;
pub mod mutator;
pub mod path;
pub mod synthesizer;
pub mod validation;

pub use arena::{Entry, RouteTree};
pub use display::TreeDisplay;
pub use entities::*;
pub use error::{DomainError, DomainResult, ValidationError};
pub use lookup::DirectoryPath;
pub use mutator::DEFAULT_SEGMENT_NAME;
pub use validation::{validate_entry_name, validate_route_path, validate_segment_name};
