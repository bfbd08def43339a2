use clap::Parser;
use mediwise::{Config, Mediwise};

fn main() {
    let config = Config::parse();

    if let Err(e) = config.init_logging() {
        eprintln!("Error opening log file: {}", e);
        std::process::exit(1);
    }

    let app = match Mediwise::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "start-up failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run() {
        tracing::error!(error = %e, "terminal loop failed");
        eprintln!("Error running mediwise: {}", e);
        std::process::exit(1);
    }
}
