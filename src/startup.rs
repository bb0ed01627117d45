use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use crate::storage::KvActor;
use crate::tracker::input::{RawShiftFields, UpsertRequest};
use crate::tracker::models::{ScheduleRecord, WeekSummary, WeekView};
use crate::tracker::TrackerHandle;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    Ok(Config::load()?)
}

/// Start the storage and tracker actors, then drive the console loop
/// until the user quits or a termination signal arrives
pub async fn run(config: Config) -> miette::Result<()> {
    let (mut kv_actor, kv_handle) = KvActor::new(&config.redis_url)?;

    // Spawn the key-value actor task
    tokio::spawn(async move {
        kv_actor.run().await;
    });

    let tracker = TrackerHandle::new(Arc::new(kv_handle.clone()), config.default_hourly_rate);

    // Create shutdown channel and spawn the signal handler task
    let (shutdown_send, shutdown_recv) = oneshot::channel();
    tokio::spawn(shutdown::handle_signals(
        shutdown_send,
        tracker.clone(),
        kv_handle.clone(),
    ));

    info!("Tracker ready");

    tokio::select! {
        result = console_loop(tracker.clone()) => {
            let _ = tracker.shutdown().await;
            let _ = kv_handle.shutdown().await;
            result
        }
        _ = shutdown_recv => {
            info!("Received shutdown signal, exiting");
            Ok(())
        }
    }
}

/// Line-oriented console standing in for the form UI: parses commands
/// into tracker intents and renders the returned view models
async fn console_loop(tracker: TrackerHandle) -> miette::Result<()> {
    print_week(&tracker).await;
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match command {
            "help" => print_help(),
            "week" => print_week(&tracker).await,
            "prev" => {
                report(tracker.navigate(-1).await.map(|_| ()));
                print_week(&tracker).await;
            }
            "next" => {
                report(tracker.navigate(1).await.map(|_| ()));
                print_week(&tracker).await;
            }
            "add" => {
                match parse_add(&args) {
                    Ok(request) => match tracker.upsert(request).await {
                        Ok(outcome) if outcome.created => println!("Added."),
                        Ok(_) => println!("Updated existing entry."),
                        Err(e) => println!("Error: {}", e),
                    },
                    Err(e) => println!("Error: {}", e),
                }
                print_week(&tracker).await;
            }
            "rm" => match args.first() {
                Some(record_date) => {
                    report(tracker.remove(*record_date).await);
                    print_week(&tracker).await;
                }
                None => println!("Usage: rm DD/MM/YYYY"),
            },
            "rate" => match args.first() {
                Some(raw) => match raw.parse::<i64>() {
                    Ok(rate) => {
                        report(tracker.set_rate(rate).await);
                        print_week(&tracker).await;
                    }
                    Err(_) => println!("Usage: rate <integer>"),
                },
                None => match tracker.rate().await {
                    Ok(rate) => println!("Hourly rate: {}", rate),
                    Err(e) => println!("Error: {}", e),
                },
            },
            "export" => match tracker.export().await {
                Ok(export) => match serde_json::to_string_pretty(&export.document) {
                    Ok(json) => match tokio::fs::write(&export.filename, json).await {
                        Ok(()) => println!("Wrote {}", export.filename),
                        Err(e) => println!("Error: {}", e),
                    },
                    Err(e) => println!("Error: {}", e),
                },
                Err(e) => println!("Error: {}", e),
            },
            "clear" => {
                report(tracker.clear_all().await);
                print_week(&tracker).await;
            }
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help' for commands.", other),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  week                                  show the selected week");
    println!("  prev / next                           move one week back or forward");
    println!("  add DD/MM/YYYY HH:MM-HH:MM [HH:MM-HH:MM]   record a day's shifts");
    println!("  rm DD/MM/YYYY                         delete a day's entry");
    println!("  rate [N]                              show or change the hourly rate");
    println!("  export                                write the week to a JSON file");
    println!("  clear                                 delete all recorded data");
    println!("  quit                                  exit");
}

fn parse_add(args: &[&str]) -> miette::Result<UpsertRequest> {
    let usage = || Error::Validation("Usage: add DD/MM/YYYY HH:MM-HH:MM [HH:MM-HH:MM]".to_string());

    let date = args.first().ok_or_else(usage)?.to_string();
    let shift1 = parse_shift(args.get(1).ok_or_else(usage)?).ok_or_else(usage)?;
    let shift2 = match args.get(2) {
        Some(raw) => parse_shift(raw).ok_or_else(usage)?,
        None => RawShiftFields::default(),
    };

    Ok(UpsertRequest {
        date,
        shift1,
        shift2,
    })
}

fn parse_shift(raw: &str) -> Option<RawShiftFields> {
    let (start, end) = raw.split_once('-')?;
    Some(RawShiftFields::from_times(start, end))
}

fn report(result: Result<(), Error>) {
    if let Err(e) = result {
        println!("Error: {}", e);
    }
}

async fn print_week(tracker: &TrackerHandle) {
    let view = match tracker.current_week().await {
        Ok(view) => view,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    let records = tracker.week_records().await.unwrap_or_default();
    let summary = match tracker.summary().await {
        Ok(summary) => summary,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };

    render_week(&view, &records, &summary);
}

fn render_week(view: &WeekView, records: &[ScheduleRecord], summary: &WeekSummary) {
    println!();
    println!(
        "Week {} ({} to {}){}",
        view.week_number,
        view.start,
        view.end,
        if view.is_current_week { " [current]" } else { "" }
    );

    if records.is_empty() {
        println!("  No entries this week.");
    }
    for record in records {
        let shift2 = match (&record.start_time2, &record.end_time2) {
            (Some(start), Some(end)) => format!("  {}-{} ({:.1}h)", start, end, record.hours_worked2),
            _ => String::new(),
        };
        println!(
            "  {}  {}-{} ({:.1}h){}  total {:.1}h  ${:.0}",
            record.date,
            record.start_time1.as_deref().unwrap_or("-"),
            record.end_time1.as_deref().unwrap_or("-"),
            record.hours_worked1,
            shift2,
            record.total_hours_day,
            record.salary_day,
        );
    }

    println!(
        "  Summary: {:.1}h over {} day(s), average {:.1}h/day, salary ${:.0}",
        summary.total_hours, summary.working_days, summary.daily_average, summary.total_salary
    );
}
