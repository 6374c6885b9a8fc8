use comfy_table::{Cell, Table};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::{sync::Mutex, time::Duration};

/// Per-command timings for the current process.
pub static BENCH: Lazy<Mutex<Bench>> = Lazy::new(|| Mutex::new(Bench::new()));

#[derive(Debug)]
struct Stat {
    count: u32,
    total: Duration,
    min: Duration,
    max: Duration,
}

impl Stat {
    fn new() -> Self {
        Stat {
            count: 0,
            total: Duration::ZERO,
            min: Duration::MAX,
            max: Duration::ZERO,
        }
    }

    fn record(&mut self, d: Duration) {
        self.count += 1;
        self.total += d;
        self.min = self.min.min(d);
        self.max = self.max.max(d);
    }

    fn avg(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total / self.count
        }
    }
}

#[derive(Debug, Default)]
pub struct Bench {
    // keeps the order in which command kinds were first seen
    stats: IndexMap<&'static str, Stat>,
}

impl Bench {
    pub fn new() -> Self {
        Bench {
            stats: IndexMap::new(),
        }
    }

    /// Record one sample of duration `d` under the key `name`.
    pub fn record(&mut self, name: &'static str, d: Duration) {
        self.stats.entry(name).or_insert_with(Stat::new).record(d);
    }

    #[allow(dead_code)]
    pub fn count(&self, name: &str) -> u32 {
        self.stats.get(name).map_or(0, |st| st.count)
    }

    /// avg / min / max / count per command kind, in first-seen order.
    pub fn summary(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("Command"),
            Cell::new("Avg"),
            Cell::new("Min"),
            Cell::new("Max"),
            Cell::new("Count"),
        ]);

        for (&name, st) in &self.stats {
            table.add_row(vec![
                Cell::new(name),
                Cell::new(format!("{:?}", st.avg())),
                Cell::new(format!("{:?}", st.min)),
                Cell::new(format!("{:?}", st.max)),
                Cell::new(st.count),
            ]);
        }
        table
    }
}
