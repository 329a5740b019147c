//! MagiskHluda - florida-server module builder
//!
//! Fetches the newest usable florida-server release and lays out the files
//! the module zip is built from.

use std::process::ExitCode;

use clap::Parser;

use magisk_hluda::config::BuildConfig;
use magisk_hluda::http::UreqClient;
use magisk_hluda::logging::{init_logger, log_error, log_info, RunInfo};
use magisk_hluda::pipeline;

#[derive(Parser, Debug)]
#[command(name = "magisk-hluda", version, about = "Build the florida-server Magisk module payload")]
struct Cli {
    /// Upstream release tag to package (falls back to the latest usable release)
    #[arg(value_name = "VERSION")]
    preferred_version: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = BuildConfig::from_env();

    init_logger(
        config.log_dir.as_deref(),
        &RunInfo {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            upstream: config.upstream.clone(),
            repository: config.identity.repository.clone(),
            author: config.identity.author.clone(),
            preferred_version: cli.preferred_version.clone(),
        },
    );
    log_info("MagiskHluda starting up...");

    let client = UreqClient::new(&config.api_base, config.token.clone());
    match pipeline::run(&client, &config, cli.preferred_version.as_deref()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
