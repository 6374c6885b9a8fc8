pub mod memory;
pub mod script;
pub mod util;

use anyhow::{bail, Context, Result};
use script::{Runner, Script};
use std::io::Write;

const USAGE: &str = "usage: placement-sim <script> [--stats]";

struct Args {
    script: String,
    stats: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut script = None;
        let mut stats = false;
        for arg in args {
            match arg.as_str() {
                "--stats" => stats = true,
                "-h" | "--help" => bail!(USAGE),
                _ if script.is_none() => script = Some(arg),
                _ => bail!("unexpected argument {:?}\n{}", arg, USAGE),
            }
        }
        let Some(script) = script else {
            bail!(USAGE);
        };
        Ok(Args { script, stats })
    }
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse(std::env::args().skip(1))?;
    println!("Reading From File : {}\n", args.script);

    let script = Script::from_file(&args.script)?;
    let mut runner = Runner::for_script(&script)
        .with_context(|| format!("cannot set up memory for {}", args.script))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = runner.run(&script.commands, &mut out)?;

    if args.stats {
        writeln!(out, "\n{}", runner.stats().table())?;
        if let Ok(bench) = util::BENCH.lock() {
            writeln!(out, "{}", bench.summary())?;
        }
    }
    log::debug!("final state: {:?}", runner.manager());
    if report.rejected > 0 {
        log::warn!("{} of {} commands were rejected", report.rejected, report.commands);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_args() {
        let parsed = args(&["input.txt"]).unwrap();
        assert_eq!(parsed.script, "input.txt");
        assert!(!parsed.stats);

        let parsed = args(&["--stats", "input.txt"]).unwrap();
        assert_eq!(parsed.script, "input.txt");
        assert!(parsed.stats);
    }

    #[test]
    fn test_bad_args() {
        assert!(args(&[]).is_err());
        assert!(args(&["a.txt", "b.txt"]).is_err());
        assert!(args(&["--help"]).is_err());
    }
}
