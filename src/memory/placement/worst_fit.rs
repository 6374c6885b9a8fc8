use super::{candidates, PlacementStrategy};
use crate::memory::Block;

/// Takes the largest free block that is large enough.
///
/// On ties the lowest-addressed block wins: a candidate only replaces the
/// running best when it is strictly larger.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFit;

impl PlacementStrategy for WorstFit {
    fn name(&self) -> &'static str {
        "worst-fit"
    }

    fn select(&self, blocks: &[Block], size: u64) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (idx, block) in candidates(blocks, size) {
            match best {
                Some((_, best_size)) if block.size() <= best_size => {}
                _ => best = Some((idx, block.size())),
            }
        }
        best.map(|(idx, _)| idx)
    }
}
