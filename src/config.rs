use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Explore a living ship, gather companions and reach the escape pod.
#[derive(Parser, Debug, Clone)]
#[command(name = "nautiloid", version)]
pub struct Config {
    /// World definition to load
    #[arg(long, default_value = "public/nautiloid.toml")]
    pub world: PathBuf,

    /// Seed for combat rolls (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "nautiloid=info")]
    pub log: String,
}

impl Config {
    /// `RUST_LOG` wins over `--log`.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::parse_from(["nautiloid"]);
        assert_eq!(cfg.world, PathBuf::from("public/nautiloid.toml"));
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.log, "nautiloid=info");
    }

    #[test]
    fn seed_and_world_override() {
        let cfg = Config::parse_from(["nautiloid", "--seed", "42", "--world", "w.toml"]);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.world, PathBuf::from("w.toml"));
    }
}
