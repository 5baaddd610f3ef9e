//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services are concrete structs, not traits.

mod routes;
mod scanner;

pub use routes::{Preview, RouteService};
pub use scanner::TreeScanner;
