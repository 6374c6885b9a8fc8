use super::{Command, Script};
use crate::memory::{AllocError, Block, MemoryManager, MemoryStats, PlacementMethod};
use crate::util::{Timer, BENCH};
use std::io::{self, Write};

/// Counters for one run of a script.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunReport {
    pub commands: usize,
    pub allocations: usize,
    pub deallocations: usize,
    pub snapshots: usize,
    /// Requests the engine refused (out of memory, unknown pid, ...).
    pub rejected: usize,
}

/// Feeds commands to a [`MemoryManager`] and renders its snapshots.
pub struct Runner {
    manager: MemoryManager,
    report: RunReport,
}

impl Runner {
    pub fn new(method: PlacementMethod, total_size: u64) -> Result<Self, AllocError> {
        Ok(Self {
            manager: MemoryManager::new(method, total_size)?,
            report: RunReport::default(),
        })
    }

    pub fn for_script(script: &Script) -> Result<Self, AllocError> {
        Self::new(script.method, script.total_size)
    }

    pub fn manager(&self) -> &MemoryManager {
        &self.manager
    }

    pub fn report(&self) -> RunReport {
        self.report
    }

    pub fn stats(&self) -> MemoryStats {
        self.manager.stats()
    }

    /// Runs `commands` in order. Refused requests are logged and skipped;
    /// only a failure to write output stops the run.
    pub fn run<W: Write>(&mut self, commands: &[Command], out: &mut W) -> io::Result<RunReport> {
        log::info!(
            "running {} commands with {} over {} units",
            commands.len(),
            self.manager.method(),
            self.manager.total_size()
        );
        for command in commands {
            self.execute(command, out)?;
        }
        log::info!("finished: {:?}", self.report);
        Ok(self.report)
    }

    pub fn execute<W: Write>(&mut self, command: &Command, out: &mut W) -> io::Result<()> {
        let timer = Timer::new();
        let result = match command {
            Command::Allocate { pid, size } => self.manager.allocate(pid, *size).map(|alloc| {
                if alloc.compacted {
                    log::info!("compacted memory to place {}", alloc.pid);
                }
                self.report.allocations += 1;
            }),
            Command::Deallocate { pid } => self.manager.deallocate(pid).map(|_| {
                self.report.deallocations += 1;
            }),
            Command::Print => {
                render_snapshot(self.manager.snapshot(), out)?;
                self.report.snapshots += 1;
                Ok(())
            }
        };
        if let Ok(mut bench) = BENCH.lock() {
            bench.record(command.name(), timer.elapsed());
        }

        self.report.commands += 1;
        if let Err(e) = result {
            log::warn!("{} rejected: {}", command.name(), e);
            self.report.rejected += 1;
        }
        Ok(())
    }
}

/// Writes one line per block, lowest address first.
pub fn render_snapshot<W: Write>(blocks: &[Block], out: &mut W) -> io::Result<()> {
    for block in blocks {
        writeln!(out, "{}", block)?;
    }
    Ok(())
}
