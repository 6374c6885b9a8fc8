use super::{AllocError, Block, MemoryStats, Pid, PlacementMethod, PlacementStrategy};
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};

/// Where a successful request landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub pid: Pid,
    pub start: u64,
    pub size: u64,
    /// Whether the block list had to be compacted to satisfy the request.
    pub compacted: bool,
}

/// Contiguous-memory manager over a fixed address space `[0, total_size)`.
///
/// The block list is kept sorted by start offset, covers the whole address
/// space without gaps or overlaps, never holds two neighbouring free blocks,
/// and holds at most one block per pid.
#[derive(Clone)]
pub struct MemoryManager {
    method: PlacementMethod,
    total_size: u64,
    blocks: Vec<Block>,
    compactions: u32,
}

impl Debug for MemoryManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MemoryManager {{ method: {}, total_size: {}, blocks: {}, compactions: {} }}",
            self.method,
            self.total_size,
            self.blocks.len(),
            self.compactions
        )
    }
}

impl MemoryManager {
    /// Creates a manager whose whole address space is one free block.
    pub fn new(method: PlacementMethod, total_size: u64) -> Result<Self, AllocError> {
        if total_size == 0 {
            return Err(AllocError::InvalidSize);
        }
        Ok(Self {
            method,
            total_size,
            blocks: vec![Block::free(0, total_size)],
            compactions: 0,
        })
    }

    pub fn method(&self) -> PlacementMethod {
        self.method
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn compactions(&self) -> u32 {
        self.compactions
    }

    /// Ordered view of the block list, lowest address first.
    pub fn snapshot(&self) -> &[Block] {
        &self.blocks
    }

    pub fn lookup(&self, pid: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.is_owned_by(pid))
    }

    pub fn free_space(&self) -> u64 {
        self.blocks
            .iter()
            .filter(|block| !block.in_use())
            .map(Block::size)
            .sum()
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats::collect(&self.blocks, self.total_size, self.compactions)
    }

    /// Reserves `size` units for `pid`.
    ///
    /// When no free block is large enough the list is compacted and the
    /// placement is retried once. The compaction is kept even if the retry
    /// fails.
    pub fn allocate(&mut self, pid: &str, size: u64) -> Result<Allocation, AllocError> {
        if size == 0 {
            return Err(AllocError::InvalidSize);
        }
        if self.position_of(pid).is_some() {
            return Err(AllocError::DuplicatePid {
                pid: pid.to_string(),
            });
        }

        let mut compacted = false;
        let idx = match self.method.select(&self.blocks, size) {
            Some(idx) => idx,
            None => {
                log::debug!(
                    "{}: no free block holds {} units for {}, compacting",
                    self.method,
                    size,
                    pid
                );
                self.compact();
                compacted = true;
                self.method
                    .select(&self.blocks, size)
                    .ok_or_else(|| AllocError::OutOfMemory {
                        pid: pid.to_string(),
                        requested: size,
                        free: self.free_space(),
                    })?
            }
        };

        let start = self.split(idx, pid, size);
        log::debug!("allocated {} units at {} for {}", size, start, pid);
        self.check_invariants();

        Ok(Allocation {
            pid: pid.to_string(),
            start,
            size,
            compacted,
        })
    }

    /// Frees the block held by `pid` and merges it with free neighbours.
    ///
    /// Returns the block as it was before release.
    pub fn deallocate(&mut self, pid: &str) -> Result<Block, AllocError> {
        let idx = self
            .position_of(pid)
            .ok_or_else(|| AllocError::UnknownPid {
                pid: pid.to_string(),
            })?;

        let released = self.blocks[idx].clone();
        self.blocks[idx].release();

        // the following block first, then the preceding one, both relative to
        // the released block's original index
        if idx + 1 < self.blocks.len() && !self.blocks[idx + 1].in_use() {
            let next = self.blocks.remove(idx + 1);
            let current = &mut self.blocks[idx];
            current.resize(current.size() + next.size());
            log::debug!("merged free block at {} into {}", next.start(), idx);
        }
        if idx > 0 && !self.blocks[idx - 1].in_use() {
            let current = self.blocks.remove(idx);
            let prev = &mut self.blocks[idx - 1];
            prev.resize(prev.size() + current.size());
            log::debug!("merged free block at {} into {}", current.start(), idx - 1);
        }

        self.check_invariants();
        Ok(released)
    }

    /// Slides every used block towards offset 0, keeping their order, and
    /// gathers all free space into one trailing block.
    pub fn compact(&mut self) {
        self.blocks.retain(Block::in_use);

        let mut next_start = 0;
        for block in self.blocks.iter_mut() {
            block.move_to(next_start);
            next_start += block.size();
        }
        if next_start < self.total_size {
            self.blocks
                .push(Block::free(next_start, self.total_size - next_start));
        }

        self.compactions += 1;
        log::debug!(
            "compacted to {} blocks, free space starts at {}",
            self.blocks.len(),
            next_start
        );
        self.check_invariants();
    }

    /// Drops every allocation.
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.blocks.push(Block::free(0, self.total_size));
        self.compactions = 0;
    }

    /// Checks the block list against its layout rules.
    pub fn verify(&self) -> Result<(), String> {
        let first = self.blocks.first().ok_or("block list is empty")?;
        if first.start() != 0 {
            return Err(format!("first block starts at {}", first.start()));
        }

        let mut pids = HashSet::new();
        for (idx, block) in self.blocks.iter().enumerate() {
            if block.size() == 0 {
                return Err(format!("block {idx} has size 0"));
            }
            if let Some(pid) = block.pid() {
                if !pids.insert(pid) {
                    return Err(format!("pid {pid} holds more than one block"));
                }
            }
        }

        for (idx, pair) in self.blocks.windows(2).enumerate() {
            let (left, right) = (&pair[0], &pair[1]);
            if left.next_start() != right.start() {
                return Err(format!(
                    "block {} ends at {} but block {} starts at {}",
                    idx,
                    left.next_start(),
                    idx + 1,
                    right.start()
                ));
            }
            if !left.in_use() && !right.in_use() {
                return Err(format!("blocks {} and {} are both free", idx, idx + 1));
            }
        }

        // the list is non-empty, checked above
        let last = &self.blocks[self.blocks.len() - 1];
        if last.next_start() != self.total_size {
            return Err(format!(
                "last block ends at {}, address space ends at {}",
                last.next_start(),
                self.total_size
            ));
        }
        Ok(())
    }

    /* --------------------------------------------------------------------- */
    /*                          internal helpers                             */
    /* --------------------------------------------------------------------- */

    fn position_of(&self, pid: &str) -> Option<usize> {
        self.blocks.iter().position(|block| block.is_owned_by(pid))
    }

    /// Carves `size` units for `pid` off the front of the free block at `idx`.
    ///
    /// The caller guarantees that block is free and holds at least `size`.
    fn split(&mut self, idx: usize, pid: &str, size: u64) -> u64 {
        let start = self.blocks[idx].start();
        self.blocks.insert(idx, Block::owned(pid, start, size));

        let remainder = &mut self.blocks[idx + 1];
        remainder.resize(remainder.size() - size);
        remainder.move_to(start + size);
        if remainder.size() == 0 {
            self.blocks.remove(idx + 1);
        }
        start
    }

    fn check_invariants(&self) {
        if cfg!(debug_assertions) {
            if let Err(e) = self.verify() {
                panic!("block list corrupted: {e}");
            }
        }
    }
}
