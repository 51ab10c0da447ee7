//! Example demonstrating the aggregated error report
//!
//! Every failing field is listed, in declaration order, both as text and as
//! structured records.

use envtag::Lookup;

#[derive(Debug, Default, Lookup)]
struct Config {
    #[env("DATABASE_URL,required")]
    pub database_url: String,

    #[env("APP_ENV,expectedValues=development staging production")]
    pub app_env: String,

    #[env("MAX_CONNECTIONS")]
    pub max_connections: i64,

    #[env("DEBUG")]
    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::remove_var("DATABASE_URL");
    std::env::set_var("APP_ENV", "qa");
    std::env::set_var("MAX_CONNECTIONS", "many");
    std::env::set_var("DEBUG", "yes");

    match Config::from_env() {
        Ok(config) => println!("{config:?}"),
        Err(e) => {
            println!("{} problem(s):\n{e}\n", e.len());
            println!("{}", serde_json::to_string_pretty(&e)?);
        }
    }

    Ok(())
}
