mod path;
pub use path::*;

mod timer;
pub use timer::*;

mod bench;
pub use bench::*;
