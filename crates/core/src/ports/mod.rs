mod pagination;
mod source;

pub use pagination::*;
pub use source::*;
