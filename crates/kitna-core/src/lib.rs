pub mod calculator;
pub mod catalog;
pub mod error;
pub mod estimator;
pub mod session;
pub mod voice;

pub use calculator::*;
pub use catalog::*;
pub use error::*;
pub use estimator::*;
pub use session::*;
pub use voice::*;
