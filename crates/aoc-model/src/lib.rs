pub mod date;
pub mod error;
pub mod outcome;
pub mod puzzle;

pub use error::Error;
pub use outcome::*;
pub use puzzle::*;
