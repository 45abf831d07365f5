pub mod row;
pub mod utterance;

pub use row::*;
pub use utterance::*;
