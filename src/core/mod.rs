pub mod candidate;
pub mod filter;
pub mod picker;
pub mod query;

pub use candidate::{Candidate, RankedCandidate};
pub use filter::{FuzzyFilter, filter};
pub use picker::{Input, Phase, Picker, WrapPolicy};
pub use query::QueryInput;
