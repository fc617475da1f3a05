use std::{collections::HashMap, env, path::PathBuf};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::logging;

const CONFIG_PATH: &str = "app.json";

const DASHBOARD_DOCUMENT_PATH: &str = "DASHBOARD_DOCUMENT_PATH";
const RUN_SUMMARY_PATH: &str = "RUN_SUMMARY_PATH";
const PORTFOLIO_HOLDINGS: &str = "PORTFOLIO_HOLDINGS";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct App {
    pub portfolio: Portfolio,
}

/// Holdings list and the file paths the run works against.
///
/// The holdings are kept in configuration rather than in the fetch/patch
/// logic so tests can run against synthetic symbols and documents.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Portfolio {
    /// Lookup symbols, in fetch order. URL-encoded where the exchange
    /// symbol contains characters unsafe in a URL path (e.g. "M%26M").
    pub holdings: Vec<String>,
    /// Lookup symbol → display name. The display name is what the
    /// dashboard document and the run summary key records by.
    #[serde(default)]
    pub display_names: HashMap<String, String>,
    /// Dashboard document, read and overwritten in place.
    pub document_path: String,
    /// Run summary JSON, overwritten every run.
    pub summary_path: String,
}

impl Portfolio {
    /// Resolves a lookup symbol to its display name, which falls back to
    /// the symbol itself when no mapping exists.
    pub fn display_name<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.display_names
            .get(symbol)
            .map(String::as_str)
            .unwrap_or(symbol)
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Portfolio {
            holdings: [
                "ANTELOPUS",
                "AUBANK",
                "AVANTIFEED",
                "BANKINDIA",
                "BONDADA",
                "BSE",
                "CANBK",
                "EIHAHOTELS",
                "GKENERGY",
                "ICICIBANK",
                "ICIL",
                "KARURVYSYA",
                "KPEL",
                "KPIGREEN",
                "KPITTECH",
                "M%26M",
                "MOSCHIP",
                "MOTILALOFS",
                "NETWEB",
                "NH",
                "OBEROIRLTY",
                "SENCO",
                "SENORES",
                "SPORTKING",
                "SYRMA",
                "WAAREEENER",
                "WAAREERTL",
                "ZAGGLE",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            display_names: HashMap::from([("M%26M".to_string(), "M&M".to_string())]),
            document_path: "index.html".to_string(),
            summary_path: "update_log.json".to_string(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        App {
            portfolio: Portfolio::default(),
        }
    }
}

pub static SETTINGS: Lazy<App> = Lazy::new(|| App::get().expect("Config error"));

impl App {
    fn get() -> Result<Self> {
        let config_path = config_path();
        if config_path.exists() {
            let config: App = config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize()?;
            return Ok(config.override_with_env());
        }

        Ok(App::default().override_with_env())
    }

    /// Overrides the configuration-file values with any set in the env.
    fn override_with_env(mut self) -> Self {
        if let Ok(path) = env::var(DASHBOARD_DOCUMENT_PATH) {
            self.portfolio.document_path = path;
        }

        if let Ok(path) = env::var(RUN_SUMMARY_PATH) {
            self.portfolio.summary_path = path;
        }

        if let Ok(holdings) = env::var(PORTFOLIO_HOLDINGS) {
            match serde_json::from_str::<Vec<String>>(&holdings) {
                Ok(list) => {
                    self.portfolio.holdings = list;
                }
                Err(why) => {
                    logging::error_file_async(format!(
                        "Failed to serde_json because: {:?} \r\n {}",
                        why, &holdings
                    ));
                }
            }
        }

        self
    }
}

fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_portfolio() {
        dotenv::dotenv().ok();
        let portfolio = Portfolio::default();

        assert_eq!(portfolio.holdings.len(), 28);
        assert!(portfolio.holdings.contains(&"M%26M".to_string()));
        assert_eq!(portfolio.document_path, "index.html");
        assert_eq!(portfolio.summary_path, "update_log.json");
    }

    #[test]
    fn test_display_name_mapping() {
        let portfolio = Portfolio::default();

        assert_eq!(portfolio.display_name("M%26M"), "M&M");
        assert_eq!(portfolio.display_name("AUBANK"), "AUBANK");
    }

    #[test]
    fn test_override_with_env() {
        env::set_var(DASHBOARD_DOCUMENT_PATH, "target/test_index.html");
        let app = App::default().override_with_env();
        env::remove_var(DASHBOARD_DOCUMENT_PATH);

        assert_eq!(app.portfolio.document_path, "target/test_index.html");
    }
}
