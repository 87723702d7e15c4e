//! Game rules that are not tied to a single phase.
//!
//! - `check_victory`: the win condition, a pure function of alive counts

pub mod victory;

pub use victory::{check_victory, Victory};
