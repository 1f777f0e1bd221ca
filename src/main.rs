mod config;
mod console;
mod error;
mod logger;
mod model;

use std::env;

use config::{load_config, ShopConfig};
use console::TerminalConsole;
use error::Result;
use model::car_service::{CarService, SessionSummary};
use model::random::SeededRandom;

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = match parse_config_path(&args) {
        Some(config_path) => match load_config(&config_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config from {}: {}", config_path, err);
                std::process::exit(1);
            }
        },
        None => ShopConfig::default(),
    };

    if let Err(err) = logger::init_logger(config.log_level, config.log_file.as_deref()) {
        eprintln!("Failed to open log file: {}", err);
        std::process::exit(1);
    }

    match run_shop(&config) {
        Ok(summary) => {
            println!();
            println!("{}", summary);
        }
        Err(err) => {
            tracing::error!(error = %err, "shop session aborted");
            eprintln!("Shop session aborted: {}", err);
            std::process::exit(1);
        }
    }
}

fn parse_config_path(args: &[String]) -> Option<String> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => return iter.next().cloned(),
            path => return Some(path.to_string()),
        }
    }
    None
}

fn run_shop(config: &ShopConfig) -> Result<SessionSummary> {
    let settings = config.to_settings()?;
    if config.seed.is_some() {
        tracing::info!(seed = ?config.seed, "using fixed seed");
    }
    let random = SeededRandom::new(config.seed);

    let mut service = CarService::new(TerminalConsole::new(), Box::new(random), settings);
    service.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_path_supports_flags_and_positionals() {
        let args = vec![
            "repairshop".to_string(),
            "--config".to_string(),
            "path/a.json".to_string(),
        ];
        assert_eq!(parse_config_path(&args), Some("path/a.json".to_string()));

        let args = vec![
            "repairshop".to_string(),
            "-c".to_string(),
            "path/b.json".to_string(),
        ];
        assert_eq!(parse_config_path(&args), Some("path/b.json".to_string()));

        let args = vec!["repairshop".to_string(), "path/c.json".to_string()];
        assert_eq!(parse_config_path(&args), Some("path/c.json".to_string()));

        let args = vec!["repairshop".to_string()];
        assert_eq!(parse_config_path(&args), None);
    }

    #[test]
    fn dangling_flag_gives_no_path() {
        let args = vec!["repairshop".to_string(), "--config".to_string()];
        assert_eq!(parse_config_path(&args), None);
    }
}
