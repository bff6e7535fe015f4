use crate::error::{Result, StockScanError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 残品カタログのエンドポイントURL
    pub remaining_endpoint: String,
    /// カタログJSONの置き場所
    pub catalog_dir: PathBuf,
    pub timeout_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| StockScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("stock-scan").join("config.json"))
    }

    /// エンドポイントURLを設定して保存
    pub fn set_remaining_endpoint(&mut self, url: String) -> Result<()> {
        self.remaining_endpoint = url;
        self.save()
    }

    /// タイムアウト秒を設定して保存
    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        self.timeout_seconds = seconds;
        self.save()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // 環境変数を優先
            remaining_endpoint: std::env::var("STOCK_SCAN_REMAINING_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/remaining".into()),
            catalog_dir: PathBuf::from("catalogs"),
            timeout_seconds: 10,
        }
    }
}
