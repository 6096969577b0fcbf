pub mod error;
pub mod timezone;
pub mod traits;

pub use error::{AppError, Result};
pub use traits::{Clock, FixedClock, SystemClock};
