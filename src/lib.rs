pub mod error;
pub mod interrupt;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{Result, StrandError};
pub use interrupt::Interrupt;
