use crate::memory::Pid;

/// One step of a command script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `A <pid> <size>`
    Allocate { pid: Pid, size: u64 },
    /// `D <pid>`
    Deallocate { pid: Pid },
    /// `P`
    Print,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Allocate { .. } => "allocate",
            Command::Deallocate { .. } => "deallocate",
            Command::Print => "print",
        }
    }
}
