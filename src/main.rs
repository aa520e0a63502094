use filtresp::*;

use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = cli::setup().get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::config(&matches).and_then(|config| cli::run(&config)) {
        error!("{}", e);
        std::process::exit(1);
    }
}
