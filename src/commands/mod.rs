//! CLI command handlers.

mod check_env;
mod run;

pub use check_env::run_check_env_command;
pub use run::run_ingest_command;
