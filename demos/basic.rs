//! Basic usage example
//!
//! ```sh
//! export name=the-knight email=knight@witchertown.com gender=male
//! cargo run --example basic
//! ```

use envtag::Lookup;

#[derive(Debug, Default, Lookup)]
struct Config {
    #[env("name,required")]
    pub name: String,

    #[env("email,required")]
    pub email: String,

    // Allow-list, space separated
    #[env("gender,expectedValues=male female")]
    pub gender: String,

    // Unset leaves the field at false
    #[env("enabled")]
    pub enabled: bool,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("name", "the-knight");
    std::env::set_var("email", "knight@witchertown.com");
    std::env::set_var("gender", "male");

    // Load configuration
    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Name: {}", config.name);
    println!("  Email: {}", config.email);
    println!("  Gender: {}", config.gender);
    println!("  Enabled: {}", config.enabled);

    Ok(())
}
