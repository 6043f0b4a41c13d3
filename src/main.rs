use std::path::PathBuf;
use std::process;

use clap::Parser;
use insta_auth::{CODE_FILE_PATH, Flow, SECRET_FILE_PATH, Settings};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// instants - Get an Instagram OAuth authorization code and keep it for later runs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the JSON file holding client_id, client_secret and redirect_uri
    #[arg(long, default_value = SECRET_FILE_PATH)]
    secret_path: PathBuf,

    /// Path to the file where the authorization code is cached
    #[arg(long, default_value = CODE_FILE_PATH)]
    code_path: PathBuf,

    /// Ignore the cached code and authorize again
    #[arg(long)]
    refresh: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings = Settings {
        secret_path: args.secret_path,
        code_path: args.code_path,
        ..Settings::default()
    };
    let flow = Flow {
        refresh: args.refresh,
    };

    // Prompt goes to stderr so stdout only ever carries the code
    let stdin = std::io::stdin();
    if let Err(err) = insta_auth::run(
        &settings,
        flow,
        &mut stdin.lock(),
        &mut std::io::stderr(),
        &mut std::io::stdout(),
    ) {
        error!("instants - {err}");
        process::exit(1);
    }
}
