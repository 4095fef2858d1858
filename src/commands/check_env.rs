//! `check-env`: report configuration presence without printing secrets.

use std::process::ExitCode;

use partner_ingest::config::{EnvVarStatus, env_status};

pub fn run_check_env_command() -> ExitCode {
    let status = env_status(|name| std::env::var(name).ok());
    for line in render_status(&status) {
        println!("{line}");
    }
    if status.iter().all(|s| s.present) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

fn render_status(status: &[EnvVarStatus]) -> Vec<String> {
    status
        .iter()
        .map(|s| {
            let state = match (s.present, s.secret) {
                (false, _) => "missing",
                (true, true) => "set (hidden)",
                (true, false) => "set",
            };
            format!("{} = {state}", s.name)
        })
        .collect()
}
