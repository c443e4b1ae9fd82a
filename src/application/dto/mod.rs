//! Data transfer objects.

mod outcome;

pub use outcome::{LoadOutcome, SubmitOutcome};
