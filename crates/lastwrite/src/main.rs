//! lastwrite CLI
//!
//! Binary name: `lastwrite`

use std::process;

use lastwrite::{app, cli::build_cli};

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();

    if let Err(err) = app::run(&matches).await {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {err:#}");
        }

        let code = err
            .downcast_ref::<lastwrite_core::Error>()
            .map(lastwrite_core::Error::exit_code)
            .unwrap_or(1);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}
