//! Example demonstrating custom validators
//!
//! Run with `RUST_LOG=envtag=debug` to see each field being bound.

use envtag::{EnvError, Environment, Lookup, Registry, Validator};
use tracing_subscriber::EnvFilter;

/// `range=MIN MAX`: integer value within an inclusive range.
struct Range {
    min: i64,
    max: i64,
}

impl Range {
    fn new(args: &str) -> Self {
        let mut bounds = args.split_whitespace().map(|b| b.parse::<i64>().ok());
        let min = bounds.next().flatten().unwrap_or(i64::MIN);
        let max = bounds.next().flatten().unwrap_or(i64::MAX);
        Self { min, max }
    }
}

impl Validator for Range {
    fn validate(&self, env_name: &str, value: &str) -> Result<(), EnvError> {
        if value.is_empty() {
            return Ok(());
        }
        match value.parse::<i64>() {
            Ok(n) if (self.min..=self.max).contains(&n) => Ok(()),
            _ => Err(EnvError::invalid(
                env_name,
                format!("must be between {} and {}", self.min, self.max),
            )),
        }
    }
}

#[derive(Debug, Default, Lookup)]
struct Config {
    #[env("WORKERS,required,range=1 64")]
    pub workers: u32,

    #[env("LISTEN_PORT,range=1024 65535")]
    pub listen_port: u16,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut registry = Registry::default();
    registry.add_validator("range", Range::new);

    std::env::set_var("WORKERS", "8");
    std::env::set_var("LISTEN_PORT", "8080");

    let config = Config::from_source(&registry, &Environment)?;
    println!("Workers: {}", config.workers);
    println!("Listen Port: {}", config.listen_port);

    std::env::set_var("WORKERS", "128");
    if let Err(e) = Config::from_source(&registry, &Environment) {
        println!("Rejected configuration:\n{e}");
    }

    Ok(())
}
