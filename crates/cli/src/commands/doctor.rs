//! Doctor command - validate configuration and show status

use anyhow::Result;
use reddit_relay_adapters::state::SqliteStateStore;
use serde::Serialize;
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    state: CheckResult,
    amplitude: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        state: CheckResult::error("Not checked"),
        amplitude: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(config) => {
            report.config = CheckResult::ok(format!(
                "Loaded; watching r/{}, polling every {}s",
                config.watch.subreddit, config.watch.poll_interval_secs
            ));
            Some(config)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load: {}", e));
            None
        }
    };

    if let Some(config) = &config {
        // Check state store
        report.state = match SqliteStateStore::new(&config.general.state_db_path).await {
            Ok(_) => CheckResult::ok(format!(
                "State database opens: {}",
                config.general.state_db_path.display()
            )),
            Err(e) => CheckResult::error(format!("Cannot open state database: {}", e)),
        };

        // Check Amplitude key (presence only; no call is made)
        report.amplitude = match std::env::var(&config.amplitude.api_key_env) {
            Ok(value) if !value.is_empty() => {
                CheckResult::ok(format!("{} is set", config.amplitude.api_key_env))
            }
            _ => CheckResult::error(format!(
                "{} is not set; 'run' will fail without --dry-run",
                config.amplitude.api_key_env
            )),
        };
    }

    let has_error = report.config.is_error() || report.state.is_error() || report.amplitude.is_error();
    report.overall = if has_error { "error" } else { "ok" }.to_string();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_check("config", &report.config);
        print_check("state", &report.state);
        print_check("amplitude", &report.amplitude);
        println!();
        println!("overall: {}", report.overall);
    }

    if has_error {
        anyhow::bail!("Doctor found problems");
    }

    Ok(())
}

fn print_check(name: &str, check: &CheckResult) {
    let marker = if check.is_error() { "✗" } else { "✓" };
    println!("{} {}: {}", marker, name, check.message);
}
