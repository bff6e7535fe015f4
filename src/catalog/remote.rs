//! 残品カタログ取得モジュール
//!
//! 残品カタログはセッション前ロードではなく、スキーム判定時に
//! オンデマンドで取得する。一度取得したらセッション内でキャッシュし、
//! `invalidate()` で明示的に破棄できる。

use crate::catalog::Catalog;
use crate::error::{Result, StockScanError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// 残品カタログのリモートクライアント
///
/// 取得失敗はエラーとして返すが、デコーダ側で合成ラベルに
/// 退避するため、スキャン処理全体が失敗することはない。
#[derive(Debug)]
pub struct RemainingCatalog {
    endpoint: String,
    timeout: Duration,
    client: Option<reqwest::Client>,
    cached: Mutex<Option<Catalog>>,
}

impl RemainingCatalog {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(timeout_seconds),
            client: Some(reqwest::Client::new()),
            cached: Mutex::new(None),
        }
    }

    /// 取得済みスナップショットから構築（テスト・オフライン用）
    pub fn preloaded(catalog: Catalog) -> Self {
        Self {
            endpoint: String::new(),
            timeout: Duration::ZERO,
            client: None,
            cached: Mutex::new(Some(catalog)),
        }
    }

    /// カタログを返す（キャッシュ優先、なければ一度だけGET）
    ///
    /// リクエストには設定のタイムアウトが掛かるため、
    /// ネットワーク停止でスキャンループが固まることはない。
    pub async fn fetch(&self) -> Result<Catalog> {
        if let Ok(guard) = self.cached.lock() {
            if let Some(catalog) = guard.as_ref() {
                return Ok(catalog.clone());
            }
        }

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| StockScanError::RemoteFetch("エンドポイント未設定".into()))?;

        let response = client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| StockScanError::RemoteFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| StockScanError::RemoteFetch(e.to_string()))?;

        let entries: HashMap<String, String> = response
            .json()
            .await
            .map_err(|e| StockScanError::RemoteFetch(e.to_string()))?;

        let catalog: Catalog = entries.into_iter().collect();

        if let Ok(mut guard) = self.cached.lock() {
            *guard = Some(catalog.clone());
        }

        Ok(catalog)
    }

    /// キャッシュを破棄（次回fetchで再取得）
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.cached.lock() {
            *guard = None;
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cached
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}
