pub mod metadata;
pub mod normalize;

pub use metadata::*;
pub use normalize::*;
