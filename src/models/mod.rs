pub mod order;
pub mod statistics;

pub use order::*;
pub use statistics::*;
