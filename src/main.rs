use adder::boundary::{self, Operation, Reply, Value};
use adder::config::Config;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "adder",
    version = adder::ADDER_VERSION,
    about = "Checked addition, version query and greetings in signaling or status-code form"
)]
struct Cli {
    /// Path to config file (defaults to $ADDER_CONFIG, then adder.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output buffer capacity for the safe string operations
    #[arg(long)]
    capacity: Option<usize>,

    /// Operation to run
    #[arg(value_enum)]
    operation: Operation,

    /// Operation arguments. Integer literals are always operands and anything
    /// else is text, so `greeting 42` is rejected as a type error
    #[arg(allow_negative_numbers = true)]
    args: Vec<String>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref()).context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .init();

    let capacity = cli.capacity.unwrap_or(config.buffer.capacity);
    let args: Vec<Value> = cli.args.iter().map(|a| Value::parse(a)).collect();
    debug!(op = %cli.operation, ?args, capacity, "dispatching");

    let reply = boundary::invoke(cli.operation, &args, capacity)
        .with_context(|| format!("{}() failed", cli.operation))?;

    if let Reply::Safe(status, _) = &reply {
        if !status.is_ok() {
            info!(op = %cli.operation, %status, "safe call returned failure status");
        }
    }

    println!("{}", reply.render()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn numeric_looking_name_reaches_the_boundary_as_int() {
        let cli = Cli::try_parse_from(["adder", "greeting", "42"]).unwrap();
        assert_eq!(cli.operation, Operation::Greeting);
        let args: Vec<Value> = cli.args.iter().map(|a| Value::parse(a)).collect();
        let err = boundary::invoke(cli.operation, &args, 64).unwrap_err();
        assert_eq!(err.status(), adder::Status::TypeDomain);

        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("`greeting 42` is rejected"), "{help}");
    }

    #[test]
    fn negative_operands_and_trailing_capacity_flag_parse() {
        let cli =
            Cli::try_parse_from(["adder", "add-safe", "2", "-2", "--capacity", "5"]).unwrap();
        assert_eq!(cli.args, vec!["2", "-2"]);
        assert_eq!(cli.capacity, Some(5));
    }
}
