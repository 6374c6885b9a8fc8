#![allow(dead_code)]

mod block;
pub use block::*;

mod error;
pub use error::*;

mod manager;
pub use manager::*;

mod placement;
pub use placement::*;

mod stats;
pub use stats::*;
