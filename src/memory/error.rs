use thiserror::Error;

/// Reasons the engine refuses a request. The block list is left untouched in
/// every case, except that a failed allocation may already have compacted it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("invalid size (must be > 0)")]
    InvalidSize,

    #[error("pid {pid} already holds a block")]
    DuplicatePid { pid: String },

    #[error("pid {pid} does not hold a block")]
    UnknownPid { pid: String },

    #[error("out of memory for pid {pid} (requested: {requested}, free: {free})")]
    OutOfMemory {
        pid: String,
        requested: u64,
        free: u64,
    },
}
