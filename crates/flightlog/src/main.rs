//! `ftlog` - CLI for flightlog
//!
//! This binary imports and exports logbook CSV files and prints totals,
//! currency and milestone progress from the local store.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{debug, info};

use flightlog::aggregate::{
    self, currency_checks, cumulative_series, milestone_progress, period_breakdown, recent,
    Track, Window,
};
use flightlog::checks::{checklist_item, CHECKLIST};
use flightlog::cli::{
    AddCommand, BreakdownCommand, ChecksCommand, ClearCommand, Cli, Command, ConfigCommand,
    ExportCommand, ImportCommand, MilestonesCommand, RecentCommand, TargetsCommand,
};
use flightlog::export::write_csv;
use flightlog::{init_logging, Config, Field, Logbook, MilestoneTargets, Storage, Totals};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config_path = Config::resolve_path(cli.config);
    debug!("Using configuration {}", config_path.display());

    // `config` commands load or validate the file themselves.
    let command = match cli.command {
        Command::Config(cmd) => return handle_config(&config_path, cmd),
        command => command,
    };

    let config = load_config(&config_path)?;
    let today = Local::now().date_naive();
    debug!("Today is {today}");

    let mut logbook = open_logbook(&config)?;
    run(&mut logbook, &config, &config_path, today, command)
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    Config::load_from(Some(path.to_path_buf()))
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

fn open_logbook(config: &Config) -> anyhow::Result<Logbook> {
    let path = config.database_path();
    let storage = Storage::open(&path)
        .with_context(|| format!("failed to open logbook at {}", path.display()))?;
    Ok(Logbook::load(storage, config.load_options())?)
}

fn run(
    logbook: &mut Logbook,
    config: &Config,
    config_path: &Path,
    today: NaiveDate,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Import(cmd) => handle_import(logbook, today, &cmd),
        Command::Export(cmd) => handle_export(logbook, &cmd),
        Command::Add(cmd) => handle_add(logbook, today, &cmd),
        Command::Clear(cmd) => handle_clear(logbook, &cmd),
        Command::Sample => {
            logbook.load_sample()?;
            println!("Loaded {} sample flights.", logbook.records().len());
            Ok(())
        }
        Command::Summary(args) => handle_summary(logbook, args.json),
        Command::Currency(args) => handle_currency(logbook, config, today, args.json),
        Command::Milestones(cmd) => handle_milestones(logbook, config, today, &cmd),
        Command::Cumulative(args) => handle_cumulative(logbook, args.json),
        Command::Breakdown(cmd) => handle_breakdown(logbook, config, today, &cmd),
        Command::Recent(cmd) => handle_recent(logbook, config, &cmd),
        Command::Targets(cmd) => handle_targets(logbook, cmd),
        Command::Checks(cmd) => handle_checks(logbook, cmd),
        Command::Status(args) => handle_status(logbook, config, config_path, args.json),
        Command::Config(cmd) => handle_config(config_path, cmd),
    }
}

fn handle_import(
    logbook: &mut Logbook,
    today: NaiveDate,
    cmd: &ImportCommand,
) -> anyhow::Result<()> {
    let count = logbook
        .import_file(&cmd.file, today)
        .with_context(|| format!("failed to import {}", cmd.file.display()))?;
    println!("Imported {count} flights from {}.", cmd.file.display());
    Ok(())
}

fn handle_export(logbook: &Logbook, cmd: &ExportCommand) -> anyhow::Result<()> {
    match &cmd.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_csv(logbook.records(), BufWriter::new(file))?;
            info!("Exported {} flights to {}", logbook.records().len(), path.display());
            println!("Wrote {}.", path.display());
        }
        None => {
            write_csv(logbook.records(), io::stdout().lock())?;
            println!();
        }
    }
    Ok(())
}

fn handle_add(logbook: &mut Logbook, today: NaiveDate, cmd: &AddCommand) -> anyhow::Result<()> {
    let record = cmd.to_record(today)?;
    let date = record.date;
    logbook.append_record(record)?;
    println!("Added flight on {date}. {} flights logged.", logbook.records().len());
    Ok(())
}

fn handle_clear(logbook: &mut Logbook, cmd: &ClearCommand) -> anyhow::Result<()> {
    if !cmd.yes {
        println!(
            "This will delete all {} logged flights.",
            logbook.records().len()
        );
        println!("Use --yes to confirm.");
        return Ok(());
    }
    logbook.clear_records()?;
    println!("Cleared all flights.");
    Ok(())
}

fn handle_summary(logbook: &Logbook, json: bool) -> anyhow::Result<()> {
    let totals = Totals::from_records(logbook.records());
    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
        return Ok(());
    }

    println!("Totals ({} flights)", logbook.records().len());
    println!("------");
    for field in Field::ALL {
        println!("  {:<14} {}", field.label(), format_amount(field, totals.get(field)));
    }
    Ok(())
}

fn handle_currency(
    logbook: &Logbook,
    config: &Config,
    today: NaiveDate,
    json: bool,
) -> anyhow::Result<()> {
    let checks = currency_checks(logbook.records(), &config.currency, today);
    if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
        return Ok(());
    }

    println!("Currency as of {today} (advisory)");
    println!("--------");
    for check in &checks {
        println!(
            "  {:<18} {:>3} {} in {:<9} need {:<3} {}",
            check.kind.title(),
            check.count,
            check.kind.unit(),
            check.window.to_string(),
            check.threshold,
            if check.current { "CURRENT" } else { "NOT CURRENT" },
        );
        println!("  {:<18} {}", "", check.kind.note());
    }
    Ok(())
}

fn handle_milestones(
    logbook: &Logbook,
    config: &Config,
    today: NaiveDate,
    cmd: &MilestonesCommand,
) -> anyhow::Result<()> {
    let only = cmd.track.map(Track::from);
    let progress: Vec<_> = milestone_progress(
        logbook.records(),
        logbook.targets(),
        &config.currency,
        today,
    )
    .into_iter()
    .filter(|p| only.is_none_or(|t| t == p.track))
    .collect();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }

    for track in &progress {
        println!(
            "{} ({}/{} met)",
            track.track.title(),
            track.met(),
            track.rows.len()
        );
        for row in &track.rows {
            let hint = row.hint.map(|h| format!("  ({h})")).unwrap_or_default();
            println!(
                "  {:<26} {:>6.1} / {:<5} {:>5.1}%{}",
                row.label, row.have, row.need, row.percent, hint
            );
        }
        println!();
    }
    Ok(())
}

fn handle_cumulative(logbook: &Logbook, json: bool) -> anyhow::Result<()> {
    let series = cumulative_series(logbook.records());
    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    for point in &series {
        println!("{}  {:>7.1}", point.date, point.hours);
    }
    Ok(())
}

fn handle_breakdown(
    logbook: &Logbook,
    config: &Config,
    today: NaiveDate,
    cmd: &BreakdownCommand,
) -> anyhow::Result<()> {
    let window = cmd.days.map_or_else(|| config.breakdown_window(), Window::Days);
    let breakdown = period_breakdown(logbook.records(), window, today);
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!("Last {window}");
    for category in &breakdown {
        println!("  {:<6} {:>6.1}", category.name, category.hours);
    }
    Ok(())
}

fn handle_recent(logbook: &Logbook, config: &Config, cmd: &RecentCommand) -> anyhow::Result<()> {
    let limit = cmd.limit.unwrap_or(config.display.recent_limit);
    let flights = recent(logbook.records(), limit);
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&flights)?);
        return Ok(());
    }

    if flights.is_empty() {
        println!("No flights logged.");
        return Ok(());
    }

    print!("{:<10}", "Date");
    for field in Field::ALL {
        print!(" {:>6}", short_label(field));
    }
    println!();
    for record in flights {
        print!("{}", record.date);
        for field in Field::ALL {
            print!(" {:>6}", format_amount(field, field.value(record)));
        }
        println!();
    }
    Ok(())
}

fn handle_targets(logbook: &mut Logbook, cmd: TargetsCommand) -> anyhow::Result<()> {
    match cmd {
        TargetsCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(logbook.targets())?);
            } else {
                print_targets(logbook.targets());
            }
        }
        TargetsCommand::Set { track, name, value } => {
            let next = logbook.targets().with_value(&track, &name, value)?;
            logbook.set_targets(next)?;
            println!("Set {track}.{name} = {value}.");
        }
        TargetsCommand::Reset => {
            logbook.reset_targets()?;
            println!("Targets reset to defaults.");
        }
    }
    Ok(())
}

fn print_targets(targets: &MilestoneTargets) {
    for (track, name) in MilestoneTargets::NAMES {
        if let Some(value) = targets.get(track, name) {
            println!("  {:<18} {value}", format!("{track}.{name}"));
        }
    }
}

fn handle_checks(logbook: &mut Logbook, cmd: ChecksCommand) -> anyhow::Result<()> {
    match cmd {
        ChecksCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(logbook.checks())?);
                return Ok(());
            }
            for item in CHECKLIST {
                let mark = if logbook.checks().is_done(item.id) { "x" } else { " " };
                println!("[{mark}] {:<20} {}", item.id, item.label);
            }
        }
        ChecksCommand::Set { id, undo } => {
            let Some(item) = checklist_item(&id) else {
                bail!("unknown checklist item '{id}'");
            };
            logbook.set_check(item.id, !undo)?;
            let state = if undo { "not done" } else { "done" };
            println!("Marked {} {state}.", item.id);
        }
    }
    Ok(())
}

fn handle_status(
    logbook: &Logbook,
    config: &Config,
    config_path: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let records = logbook.records();
    let stats = logbook.storage().stats()?;
    let first = records.iter().map(|r| r.date).min();
    let last = records.iter().map(|r| r.date).max();
    let total_hours = aggregate::total_sum(records, Field::Total);

    if json {
        let status = serde_json::json!({
            "flights": records.len(),
            "first_flight": first,
            "last_flight": last,
            "total_hours": aggregate::round1(total_hours),
            "checks_done": logbook.checks().completed(),
            "checks_total": CHECKLIST.len(),
            "database_path": logbook.storage().path(),
            "slots": stats.slot_count,
            "last_write": stats.last_write,
            "db_size_bytes": stats.db_size_bytes,
            "config_path": config_path,
            "seed_sample_when_empty": config.storage.seed_sample_when_empty,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("ftlog status");
    println!("------------");
    println!("Flights:       {}", records.len());
    if let (Some(first), Some(last)) = (first, last) {
        println!("Date range:    {first} to {last}");
    }
    println!("Total time:    {total_hours:.1}");
    println!(
        "Checklist:     {}/{} done",
        logbook.checks().completed(),
        CHECKLIST.len()
    );
    println!("Database:      {}", logbook.storage().path().display());
    println!("Config:        {}", config_path.display());
    println!("Stored slots:  {}", stats.slot_count);
    if let Some(last_write) = stats.last_write {
        println!("Last write:    {}", last_write.to_rfc3339());
    }
    println!("Database size: {} bytes", stats.db_size_bytes);
    Ok(())
}

fn handle_config(config_path: &Path, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!("File: {}", config_path.display());
                println!();
                println!("[Storage]");
                println!("  Database path:          {}", config.database_path().display());
                println!(
                    "  Seed sample when empty: {}",
                    config.storage.seed_sample_when_empty
                );
                println!();
                println!("[Currency]");
                println!(
                    "  Passenger window:       {}",
                    config.currency.passenger_window()
                );
                println!("  Minimum landings:       {}", config.currency.min_landings);
                println!("  IFR window:             {}", config.currency.ifr_window());
                println!(
                    "  Minimum approaches:     {}",
                    config.currency.min_approaches
                );
                println!();
                println!("[Display]");
                println!("  Recent limit:           {}", config.display.recent_limit);
                println!("  Breakdown window:       {}", config.breakdown_window());
            }
        }
        ConfigCommand::Path => {
            println!("{}", config_path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(|| config_path.to_path_buf());
            println!("Validating configuration: {}", path.display());
            load_config(&path)?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

/// Hours with one decimal, counts as whole numbers.
fn format_amount(field: Field, value: f64) -> String {
    if field.is_count() {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn short_label(field: Field) -> &'static str {
    match field {
        Field::Approaches => "Appr",
        Field::Landings => "Ldg",
        Field::NightLandings => "NtLdg",
        other => other.label(),
    }
}
