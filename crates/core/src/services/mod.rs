//! Connection-resolution services.

mod normalize;
mod resolver;

pub use normalize::*;
pub use resolver::*;
