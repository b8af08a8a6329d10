pub mod error;
pub mod types;

pub use error::{LeakError, Result};
pub use types::{ElementId, LeakVerdict, ViewId};
