use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::CampaignRecord;

pub fn generate_console_report(
    out: &mut dyn Write,
    records: &[CampaignRecord],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Campaign Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===================".cyan())?;

    let total = records.len();
    let passed = records.iter().filter(|r| r.passed).count();
    writeln!(out, "Campaigns: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for record in records {
        let status = if record.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {} (seed {})", status, record.seed_code.bold(), record.seed)?;
        writeln!(
            out,
            "   Voyages: {}  Months: {}  Ended in: {}{}",
            record.voyages,
            record.months,
            record.final_phase,
            record
                .final_city
                .as_deref()
                .map(|city| format!(" at {city}"))
                .unwrap_or_default()
        )?;
        writeln!(
            out,
            "   Cash {}  Bank {}  Debt {}  Net worth {}  Score {}",
            record.cash, record.bank, record.debt, record.net_worth, record.score
        )?;
        writeln!(
            out,
            "   Ship: {} capacity, {} guns",
            record.capacity, record.guns
        )?;
        if !record.encounters.is_empty() {
            let summary: Vec<String> = record
                .encounters
                .iter()
                .map(|(key, count)| format!("{key}×{count}"))
                .collect();
            writeln!(out, "   Log: {}", summary.join(", "))?;
        }
        for failure in &record.failures {
            writeln!(out, "     • {}", failure.red())?;
        }
        writeln!(out)?;
    }

    if let Some(best) = records.iter().max_by_key(|r| r.net_worth) {
        writeln!(
            out,
            "{} {} with a net worth of {}",
            "🏆 Richest captain:".bright_yellow().bold(),
            best.seed_code.green(),
            best.net_worth
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, records: &[CampaignRecord]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(records)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, records: &[CampaignRecord]) -> Result<()> {
    writeln!(out, "# Taipan Autopilot Results\n")?;

    let total = records.len();
    let passed = records.iter().filter(|r| r.passed).count();
    writeln!(out, "- **Campaigns**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}\n", total - passed)?;

    writeln!(
        out,
        "| Seed | Start | Voyages | Months | Ended | Net worth | Score | Status |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|---|")?;
    for record in records {
        let status = if record.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            record.seed_code,
            record.start,
            record.voyages,
            record.months,
            record.final_phase,
            record.net_worth,
            record.score,
            status
        )?;
    }

    let failing: Vec<&CampaignRecord> = records.iter().filter(|r| !r.passed).collect();
    if !failing.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for record in failing {
            for failure in &record.failures {
                writeln!(out, "- `{}`: {failure}", record.seed_code)?;
            }
        }
    }
    Ok(())
}
