//! Candidate extremum verification.
//!
//! A coarse detector proposes candidate pixels; the verifiers here keep only
//! those that are the strict (or relaxed) minimum/maximum of a square window
//! around them. [`NonMaxCandidate`] scans on the calling thread,
//! [`NonMaxCandidateParallel`] splits the candidates into blocks scanned with
//! rayon and produces the same output in the same order.

mod builder;
mod candidate;
mod config;
mod error;
mod parallel;
mod search;
mod types;

pub use builder::NonMaxBuilder;
pub use candidate::{ExtremumVerifier, NonMaxCandidate};
pub use config::NonMaxConfig;
pub use error::{NonMaxError, NonMaxResult};
pub use parallel::NonMaxCandidateParallel;
pub use search::{search_for, RelaxedSearch, StrictSearch, WindowSearch};
pub use types::{ExtremumKind, SearchData, Window};
