mod cli;
mod console;

use crate::cli::Arguments;
use crate::console::History;
use clap::Parser;
use lapwatch::engine::ticker::IntervalTicker;
use lapwatch::engine::Snapshot;
use lapwatch::input::{Input, HELP};
use lapwatch::view::View;
use lapwatch::StopwatchEngine;
use std::io;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing_log::LogTracer;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let arguments = cli::Arguments::parse();
    let history = set_log_level(&arguments).expect("Failed to configure logging");

    tracing::debug!(?arguments, "starting stopwatch");

    if let Err(e) = run(arguments, history) {
        tracing::error!(%e, "Unable to run the stopwatch");
    }
}

fn set_log_level(arguments: &Arguments) -> anyhow::Result<History> {
    LogTracer::init()?;

    let level = match arguments.verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // History records stopwatch activity regardless of the stderr verbosity.
    let history = History::default();
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_writer(io::stderr)
                .with_filter(level),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_level(false)
                .with_writer(history.clone())
                .with_filter(Targets::new().with_target("lapwatch::engine", tracing::Level::INFO)),
        );

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(history)
}

fn run(arguments: Arguments, history: History) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(console_loop(arguments, history))
}

/// Owns the engine and applies ticks and console commands one at a time.
async fn console_loop(arguments: Arguments, history: History) -> anyhow::Result<()> {
    let (tick_sender, mut ticks) = mpsc::unbounded_channel();
    let (line_sender, mut lines) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        if let Err(e) = read_loop(line_sender) {
            tracing::error!(%e, "Failed to read console input");
        }
    });

    let mut engine =
        StopwatchEngine::new(IntervalTicker::new(tick_sender)).with_tick_ms(arguments.tick_ms);

    println!("{HELP}");
    print_snapshot(&engine.snapshot(), arguments.json)?;

    loop {
        tokio::select! {
            Some(epoch) = ticks.recv() => {
                if engine.ticker().is_current(epoch) {
                    engine.tick();
                }
            }
            line = lines.recv() => {
                let Some(line) = line else {
                    tracing::debug!("Console input closed");
                    break;
                };

                match line.parse::<Input>() {
                    Ok(Input::Engine(command)) => {
                        engine.dispatch(command);
                        print_snapshot(&engine.snapshot(), arguments.json)?;
                    }
                    Ok(Input::Show) => print_snapshot(&engine.snapshot(), arguments.json)?,
                    Ok(Input::Json) => print_snapshot(&engine.snapshot(), true)?,
                    Ok(Input::Log(limit)) => {
                        for event in history.recent(limit) {
                            println!("{event}");
                        }
                    }
                    Ok(Input::Help) => println!("{HELP}"),
                    Ok(Input::Quit) => break,
                    Err(e) => {
                        tracing::warn!(%e, %line, "Ignoring console input");
                        println!("{e}");
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &Snapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        println!("{}", View(snapshot));
    }

    Ok(())
}

fn read_loop(sender: UnboundedSender<String>) -> anyhow::Result<()> {
    for line in io::stdin().lines() {
        sender.send(line?)?;
    }

    Ok(())
}
