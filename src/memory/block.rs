use std::fmt::{Display, Formatter};

/// Opaque process identifier as it appears in a command script.
pub type Pid = String;

/// Ownership state of a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockState {
    Free,
    Owned(Pid),
}

/// One contiguous region of the simulated address space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    state: BlockState,
    start: u64,
    size: u64,
}

impl Block {
    pub fn free(start: u64, size: u64) -> Self {
        Self {
            state: BlockState::Free,
            start,
            size,
        }
    }

    pub fn owned(pid: impl Into<Pid>, start: u64, size: u64) -> Self {
        Self {
            state: BlockState::Owned(pid.into()),
            start,
            size,
        }
    }

    pub fn state(&self) -> &BlockState {
        &self.state
    }

    pub fn pid(&self) -> Option<&str> {
        match &self.state {
            BlockState::Owned(pid) => Some(pid),
            BlockState::Free => None,
        }
    }

    pub fn in_use(&self) -> bool {
        matches!(self.state, BlockState::Owned(_))
    }

    pub fn is_owned_by(&self, pid: &str) -> bool {
        self.pid() == Some(pid)
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Last unit covered by this block (inclusive).
    pub fn end(&self) -> u64 {
        self.start + self.size - 1
    }

    /// One past the last unit, i.e. where the next block starts.
    pub fn next_start(&self) -> u64 {
        self.start + self.size
    }

    pub fn resize(&mut self, size: u64) {
        self.size = size;
    }

    pub fn move_to(&mut self, start: u64) {
        self.start = start;
    }

    /// Clears ownership in place. Size and start are untouched.
    ///
    /// Returns the pid that held the block, if any.
    pub fn release(&mut self) -> Option<Pid> {
        match std::mem::replace(&mut self.state, BlockState::Free) {
            BlockState::Owned(pid) => Some(pid),
            BlockState::Free => None,
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\tto\t{} is ", self.start, self.end())?;
        match &self.state {
            BlockState::Owned(pid) => {
                write!(f, "used by pid {} | process size : {}", pid, self.size)
            }
            BlockState::Free => write!(f, "empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let used = Block::owned("p1", 0, 30);
        assert_eq!(
            used.to_string(),
            "0\tto\t29 is used by pid p1 | process size : 30"
        );

        let free = Block::free(30, 70);
        assert_eq!(free.to_string(), "30\tto\t99 is empty");
    }

    #[test]
    fn test_release_keeps_extent() {
        let mut block = Block::owned("p7", 12, 8);
        assert!(block.in_use());
        assert_eq!(block.release().as_deref(), Some("p7"));
        assert!(!block.in_use());
        assert_eq!(block.start(), 12);
        assert_eq!(block.size(), 8);

        // releasing a free block is a no-op
        assert_eq!(block.release(), None);
    }

    #[test]
    fn test_single_unit_block_end() {
        let block = Block::free(5, 1);
        assert_eq!(block.end(), 5);
        assert_eq!(block.next_start(), 6);
    }
}
