// src/main.rs
use clap::Parser;
use crossterm::style::Color;
use tagfolio::cli::args::Cli;
use tagfolio::cli::display::{init_color, paint};
use tagfolio::cli::{execute_command, execute_command_with_services};
use tagfolio::config::load_settings;
use tagfolio::exitcode;
use tagfolio::infrastructure::di::ServiceContainer;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

#[instrument]
fn main() {
    // human output goes to stderr so stdout stays pipeable
    let cli = Cli::parse();

    setup_logging(cli.debug, cli.no_color);
    init_color(cli.no_color);

    match execute_command(&cli) {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => {
            eprintln!("{}", paint(format!("Error: {}", e), Color::Red));
            std::process::exit(e.exit_code());
        }
    }

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}: {}", paint("Failed to load settings", Color::Red), e);
            std::process::exit(exitcode::USAGE);
        }
    };

    // single composition root
    let services = match ServiceContainer::new(&settings) {
        Ok(container) => container,
        Err(e) => {
            eprintln!("{}: {}", paint("Failed to create service container", Color::Red), e);
            std::process::exit(exitcode::USAGE);
        }
    };
    debug!("Services ready: {:?}", services);

    if let Err(e) = execute_command_with_services(&cli, &services) {
        eprintln!("{}", paint(format!("Error: {}", e), Color::Red));
        std::process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8, no_color: bool) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}
