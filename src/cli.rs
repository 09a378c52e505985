use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about = "A console stopwatch with laps and saved sessions", long_about)]
pub struct Arguments {
    #[arg(short = 'v', long = None, env = "LAPWATCH_VERBOSITY", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Milliseconds added on every tick while running.
    #[arg(short, long, env = "LAPWATCH_TICK_MS", default_value_t = lapwatch::engine::DEFAULT_TICK_MS,
        value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Print the stopwatch as JSON instead of text.
    #[arg(long, env = "LAPWATCH_JSON")]
    pub json: bool,
}
