use super::{candidates, PlacementStrategy};
use crate::memory::Block;

/// Takes the lowest-addressed free block that is large enough.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl PlacementStrategy for FirstFit {
    fn name(&self) -> &'static str {
        "first-fit"
    }

    fn select(&self, blocks: &[Block], size: u64) -> Option<usize> {
        candidates(blocks, size).map(|(idx, _)| idx).next()
    }
}
