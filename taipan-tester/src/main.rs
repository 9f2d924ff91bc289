mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;
use taipan_game::StartOption;

use logic::{Autopilot, CampaignRecord, resolve_seed_inputs, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "taipan-tester", version)]
#[command(about = "Headless autopilot campaigns and invariant checks for the Taipan simulation")]
struct Args {
    /// Seeds to play (comma-separated numbers or share codes like DB-JUNK42)
    #[arg(long, default_value = "1860")]
    seeds: String,

    /// Voyages per campaign
    #[arg(long, default_value_t = 12)]
    voyages: usize,

    /// Opening for numeric seeds; share codes carry their own
    #[arg(long, default_value = "debt")]
    start: StartOption,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.report == ReportFormat::Console {
        announce_banner();
    }

    let start_time = Instant::now();
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds), args.start)?;
    let autopilot = Autopilot::new(args.voyages, args.verbose);

    let records: Vec<CampaignRecord> = seeds
        .iter()
        .map(|info| {
            if args.verbose {
                println!("🧪 Playing {}", info.share_code().bright_white());
            }
            autopilot.play(info)
        })
        .collect();

    write_report(&args, &records, start_time)?;

    if records.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn announce_banner() {
    println!("{}", "⛵ Taipan Autopilot".bright_cyan().bold());
    println!("{}", "===================".cyan());
}

fn write_report(args: &Args, records: &[CampaignRecord], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => {
            logic::reports::generate_json_report(output_target.writer(), records)?;
        }
        ReportFormat::Markdown => {
            logic::reports::generate_markdown_report(output_target.writer(), records)?;
        }
        ReportFormat::Console => {
            let duration = start_time.elapsed();
            logic::reports::generate_console_report(output_target.writer(), records, duration)?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_share_codes_and_formats() {
        let args = Args::try_parse_from([
            "taipan-tester",
            "--seeds",
            "7,GN-LORCHA07",
            "--start",
            "guns",
            "--report",
            "markdown",
            "--voyages",
            "3",
        ])
        .unwrap();
        assert_eq!(args.start, StartOption::Guns);
        assert_eq!(args.report, ReportFormat::Markdown);
        assert_eq!(args.voyages, 3);
        assert_eq!(split_csv(&args.seeds).len(), 2);
    }

    #[test]
    fn unknown_start_is_rejected() {
        assert!(Args::try_parse_from(["taipan-tester", "--start", "silk"]).is_err());
    }

    #[test]
    fn reports_write_to_a_buffer() {
        let info = logic::SeedInfo::from_numeric(11, StartOption::Debt);
        let records = vec![Autopilot::new(2, false).play(&info)];

        let mut json = Vec::new();
        logic::reports::generate_json_report(&mut json, &records).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed[0]["seed"], 11);

        let mut markdown = Vec::new();
        logic::reports::generate_markdown_report(&mut markdown, &records).unwrap();
        assert!(String::from_utf8_lossy(&markdown).contains("# Taipan Autopilot Results"));
    }
}
