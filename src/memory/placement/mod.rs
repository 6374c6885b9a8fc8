use super::Block;
use std::fmt::{Display, Formatter};

mod best_fit;
pub use best_fit::*;

mod first_fit;
pub use first_fit::*;

mod worst_fit;
pub use worst_fit::*;

pub trait PlacementStrategy {
    fn name(&self) -> &'static str;

    /// Picks the free block that should serve a request of `size` units.
    ///
    /// Returns the index into `blocks` of a free block with at least `size`
    /// units, or `None` when no free block is large enough. Must not have side
    /// effects: calling it twice on the same slice gives the same answer.
    fn select(&self, blocks: &[Block], size: u64) -> Option<usize>;
}

/// Free blocks that can hold `size` units, with their index in address order.
fn candidates(blocks: &[Block], size: u64) -> impl Iterator<Item = (usize, &Block)> {
    blocks
        .iter()
        .enumerate()
        .filter(move |(_, block)| !block.in_use() && block.size() >= size)
}

/// Placement method as selected by the first token of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMethod {
    FirstFit = 1,
    BestFit = 2,
    WorstFit = 3,
}

impl PlacementMethod {
    pub fn strategy(&self) -> &'static dyn PlacementStrategy {
        match self {
            PlacementMethod::FirstFit => &FirstFit,
            PlacementMethod::BestFit => &BestFit,
            PlacementMethod::WorstFit => &WorstFit,
        }
    }
}

impl PlacementStrategy for PlacementMethod {
    fn name(&self) -> &'static str {
        self.strategy().name()
    }

    fn select(&self, blocks: &[Block], size: u64) -> Option<usize> {
        self.strategy().select(blocks, size)
    }
}

impl TryFrom<u32> for PlacementMethod {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlacementMethod::FirstFit),
            2 => Ok(PlacementMethod::BestFit),
            3 => Ok(PlacementMethod::WorstFit),
            other => Err(other),
        }
    }
}

impl Display for PlacementMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Free blocks of sizes 5, 20, 8 separated by used blocks.
    fn mixed_layout() -> Vec<Block> {
        vec![
            Block::free(0, 5),
            Block::owned("a", 5, 3),
            Block::free(8, 20),
            Block::owned("b", 28, 2),
            Block::free(30, 8),
            Block::owned("c", 38, 62),
        ]
    }

    #[test]
    fn test_methods_pick_different_blocks() {
        let blocks = mixed_layout();
        assert_eq!(PlacementMethod::FirstFit.select(&blocks, 6), Some(2));
        assert_eq!(PlacementMethod::BestFit.select(&blocks, 6), Some(4));
        assert_eq!(PlacementMethod::WorstFit.select(&blocks, 6), Some(2));
    }

    #[test]
    fn test_no_fit() {
        let blocks = mixed_layout();
        for method in [
            PlacementMethod::FirstFit,
            PlacementMethod::BestFit,
            PlacementMethod::WorstFit,
        ] {
            assert_eq!(method.select(&blocks, 21), None, "{method}");
        }
    }

    #[test]
    fn test_used_blocks_are_never_selected() {
        let blocks = vec![Block::owned("a", 0, 50), Block::free(50, 10)];
        for method in [
            PlacementMethod::FirstFit,
            PlacementMethod::BestFit,
            PlacementMethod::WorstFit,
        ] {
            assert_eq!(method.select(&blocks, 10), Some(1), "{method}");
            assert_eq!(method.select(&blocks, 11), None, "{method}");
        }
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!(PlacementMethod::try_from(1), Ok(PlacementMethod::FirstFit));
        assert_eq!(PlacementMethod::try_from(2), Ok(PlacementMethod::BestFit));
        assert_eq!(PlacementMethod::try_from(3), Ok(PlacementMethod::WorstFit));
        assert_eq!(PlacementMethod::try_from(0), Err(0));
        assert_eq!(PlacementMethod::try_from(4), Err(4));
    }
}
