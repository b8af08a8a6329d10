pub mod checker;
mod worker;

pub use checker::{CheckerStats, LeakChecker};
