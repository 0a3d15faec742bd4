use clap::Parser;
use quiz_chain::{Solver, SolverConfig};

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match SolverConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load configuration from {}: {}", path, e);
                return;
            }
        },
        None => SolverConfig::new(),
    };
    config.apply_env();

    match args.command {
        Command::Solve {
            url,
            email,
            secret,
            max_steps,
        } => {
            if let Some(email) = email {
                config.email = email;
            }
            if let Some(secret) = secret {
                config.secret = secret;
            }
            if let Some(max_steps) = max_steps {
                config.max_steps = max_steps;
            }

            println!("Note: quiz solving requires a WebDriver server (e.g., ChromeDriver).");
            println!(
                "Set WEBDRIVER_URL environment variable if not using the default {}",
                config.webdriver_url
            );

            ::log::info!("Starting quiz chain at {}", url);
            let start_time = std::time::Instant::now();

            match Solver::new(&url).with_config(config).run().await {
                Ok(report) => {
                    let duration = start_time.elapsed();
                    ::log::info!(
                        "Chain finished after {} steps in {:.2} seconds ({:?}), last page {}",
                        report.steps,
                        duration.as_secs_f64(),
                        report.end,
                        report.last_url
                    );
                }
                Err(e) => {
                    ::log::error!("Chain failed: {}", e);
                }
            }
        }
        Command::Serve { addr } => {
            if let Some(addr) = addr {
                config.bind_addr = addr;
            }
            if let Err(e) = quiz_chain::server::serve(config).await {
                ::log::error!("Trigger endpoint failed: {}", e);
            }
        }
    }
}
