use std::collections::BTreeMap;
use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{Result, ShopError};
use crate::logger::LogLevel;
use crate::model::car_service::ShopSettings;
use crate::model::catalog::PartName;
use crate::model::decision::CommandKeys;

/// Upper bound for any shelf; every unit in stock is allocated up front
const STOCK_CAP: u32 = 1000;

/// Shop configuration, loaded from a JSON file.
/// Every field is optional; missing ones fall back to the defaults below.
#[derive(Debug, Deserialize)]
pub struct ShopConfig {
    /// Penalty for refusing a customer or lacking the part
    #[serde(default = "default_forfeit")]
    pub forfeit: u32,
    /// Lowest part price (inclusive)
    #[serde(default = "default_min_price")]
    pub min_price: u32,
    /// Highest part price (exclusive)
    #[serde(default = "default_max_price")]
    pub max_price: u32,
    /// Upper bound (exclusive) for the starting amount of each part
    #[serde(default = "default_max_stock")]
    pub max_stock: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_refuse_command")]
    pub refuse_command: String,
    #[serde(default = "default_exit_key")]
    pub exit_key: char,
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default)]
    pub log_file: Option<String>,
    /// Part name -> exact starting amount
    #[serde(default)]
    pub stock: BTreeMap<String, u32>,
    /// Part name -> exact price
    #[serde(default)]
    pub prices: BTreeMap<String, u32>,
}

fn default_forfeit() -> u32 {
    100
}

fn default_min_price() -> u32 {
    200
}

fn default_max_price() -> u32 {
    1000
}

fn default_max_stock() -> u32 {
    10
}

fn default_refuse_command() -> String {
    "r".to_string()
}

fn default_exit_key() -> char {
    'q'
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            forfeit: default_forfeit(),
            min_price: default_min_price(),
            max_price: default_max_price(),
            max_stock: default_max_stock(),
            seed: None,
            refuse_command: default_refuse_command(),
            exit_key: default_exit_key(),
            log_level: LogLevel::default(),
            log_file: None,
            stock: BTreeMap::new(),
            prices: BTreeMap::new(),
        }
    }
}

fn config_error(message: impl Into<String>) -> ShopError {
    ShopError::Config {
        message: message.into(),
    }
}

impl ShopConfig {
    pub fn validate(&self) -> Result<()> {
        if self.forfeit == 0 {
            return Err(config_error("forfeit must be positive"));
        }
        if self.min_price == 0 || self.min_price >= self.max_price {
            return Err(config_error(format!(
                "price range {}..{} is empty or includes zero",
                self.min_price, self.max_price
            )));
        }
        if self.max_stock == 0 || self.max_stock > STOCK_CAP {
            return Err(config_error(format!(
                "max_stock must be between 1 and {}",
                STOCK_CAP
            )));
        }
        let overstocked = self.stock.iter().find(|(_, amount)| **amount > STOCK_CAP);
        if let Some((name, amount)) = overstocked {
            return Err(config_error(format!(
                "stock of {} is {}, at most {} fit on a shelf",
                name, amount, STOCK_CAP
            )));
        }

        let refuse = self.refuse_command.trim();
        if refuse.is_empty() {
            return Err(config_error("refuse_command must not be empty"));
        }
        if refuse.parse::<i64>().is_ok() {
            return Err(config_error(format!(
                "refuse_command {:?} would collide with part numbers",
                refuse
            )));
        }
        if self.exit_key.is_whitespace() {
            return Err(config_error("exit_key must be a visible character"));
        }

        if let Some((name, _)) = self.prices.iter().find(|(_, price)| **price == 0) {
            return Err(config_error(format!("price for {} must be positive", name)));
        }
        Ok(())
    }

    /// Resolve names and build the settings the shop opens with
    pub fn to_settings(&self) -> Result<ShopSettings> {
        Ok(ShopSettings {
            forfeit: self.forfeit,
            min_price: self.min_price,
            max_price: self.max_price,
            max_stock: self.max_stock,
            keys: CommandKeys {
                refuse: self.refuse_command.trim().to_string(),
                exit: self.exit_key,
            },
            fixed_stock: resolve_part_names(&self.stock)?,
            fixed_prices: resolve_part_names(&self.prices)?,
        })
    }
}

fn resolve_part_names(entries: &BTreeMap<String, u32>) -> Result<BTreeMap<PartName, u32>> {
    entries
        .iter()
        .map(|(name, &value)| {
            PartName::from_name(name)
                .map(|part| (part, value))
                .ok_or_else(|| config_error(format!("unknown part {:?}", name)))
        })
        .collect()
}

pub fn load_config(config_path: &str) -> Result<ShopConfig> {
    tracing::debug!(path = config_path, "loading shop config");

    let path = Path::new(config_path);
    if !path.exists() {
        return Err(config_error(format!(
            "Config file not found at {}",
            config_path
        )));
    }

    let contents = fs::read_to_string(path)?;
    let config: ShopConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
