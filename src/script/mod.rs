mod command;
pub use command::*;

mod parser;
pub use parser::*;

mod runner;
pub use runner::*;
