use comfy_table::{Cell, Table};

use super::Block;

/// Occupancy figures for one snapshot of the address space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub largest_free: u64,
    pub block_count: usize,
    pub used_blocks: usize,
    pub free_blocks: usize,
    pub compactions: u32,
}

impl MemoryStats {
    pub fn collect(blocks: &[Block], total: u64, compactions: u32) -> Self {
        let mut stats = MemoryStats {
            total,
            block_count: blocks.len(),
            compactions,
            ..Default::default()
        };
        for block in blocks {
            if block.in_use() {
                stats.used += block.size();
                stats.used_blocks += 1;
            } else {
                stats.free += block.size();
                stats.free_blocks += 1;
                stats.largest_free = stats.largest_free.max(block.size());
            }
        }
        stats
    }

    /// External fragmentation: the share of free space that is not part of
    /// the largest free block. 0.0 when free space is contiguous or absent.
    pub fn fragmentation(&self) -> f64 {
        if self.free == 0 {
            return 0.0;
        }
        1.0 - self.largest_free as f64 / self.free as f64
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec![Cell::new("Metric"), Cell::new("Value")]);
        table.add_row(vec![Cell::new("Total"), Cell::new(self.total)]);
        table.add_row(vec![Cell::new("Used"), Cell::new(self.used)]);
        table.add_row(vec![Cell::new("Free"), Cell::new(self.free)]);
        table.add_row(vec![
            Cell::new("Largest free block"),
            Cell::new(self.largest_free),
        ]);
        table.add_row(vec![
            Cell::new("Blocks (used/free)"),
            Cell::new(format!(
                "{} ({}/{})",
                self.block_count, self.used_blocks, self.free_blocks
            )),
        ]);
        table.add_row(vec![
            Cell::new("Fragmentation"),
            Cell::new(format!("{:.1}%", self.fragmentation() * 100.0)),
        ]);
        table.add_row(vec![Cell::new("Compactions"), Cell::new(self.compactions)]);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect() {
        let blocks = vec![
            Block::free(0, 10),
            Block::owned("a", 10, 20),
            Block::free(30, 30),
            Block::owned("b", 60, 40),
        ];
        let stats = MemoryStats::collect(&blocks, 100, 2);
        assert_eq!(stats.used, 60);
        assert_eq!(stats.free, 40);
        assert_eq!(stats.largest_free, 30);
        assert_eq!(stats.used_blocks, 2);
        assert_eq!(stats.free_blocks, 2);
        assert_eq!(stats.block_count, 4);
        assert_eq!(stats.compactions, 2);
        assert!((stats.fragmentation() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_fragmentation_without_free_space() {
        let blocks = vec![Block::owned("a", 0, 100)];
        let stats = MemoryStats::collect(&blocks, 100, 0);
        assert_eq!(stats.fragmentation(), 0.0);
    }

    #[test]
    fn test_table_lists_every_metric() {
        let stats = MemoryStats::collect(&[Block::free(0, 64)], 64, 0);
        let rendered = stats.table().to_string();
        for label in ["Total", "Used", "Free", "Largest free block", "Compactions"] {
            assert!(rendered.contains(label), "missing {label}");
        }
    }
}
