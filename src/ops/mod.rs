//! High-level operations.
//!
//! One module per discovery phase, wired together by [`find::find_mosek`].

pub mod errors;
pub mod find;
pub mod inputs;
pub mod library_names;
pub mod search;
pub mod suffix;
pub mod validate;

pub use errors::FindError;
pub use find::{find_mosek, FindOptions, FindOutcome};
pub use search::{SearchMode, SearchPlan};
pub use validate::{FindPolicy, Validation};
