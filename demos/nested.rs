//! Example demonstrating nested configuration structs
//!
//! Nested fields keep their own variable names: `web.host` reads `HOST`,
//! not `WEB_HOST`.

use envtag::Lookup;

#[derive(Debug, Default, Lookup)]
struct WebConfig {
    #[env("HOST,required")]
    pub host: String,

    #[env("PORT,required")]
    pub port: u16,
}

#[derive(Debug, Default, Lookup)]
struct Config {
    // Recursed regardless of the annotation
    pub web: WebConfig,

    #[env("ENV,expectedValues=development production")]
    pub env: String,

    #[env("MAX_CONNECTIONS")]
    pub max_connections: i64,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("HOST", "0.0.0.0");
    std::env::set_var("PORT", "8080");
    std::env::set_var("ENV", "development");
    std::env::set_var("MAX_CONNECTIONS", "150");

    let mut config = Config::default();
    envtag::lookup(&mut config)?;

    println!("Nested configuration:");
    println!("  Web: {}:{}", config.web.host, config.web.port);
    println!("  Env: {}", config.env);
    println!("  Max Connections: {}", config.max_connections);

    Ok(())
}
