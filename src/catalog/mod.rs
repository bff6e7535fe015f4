//! 参照カタログモジュール
//!
//! 在庫・色・サイズ・バッグ・財布の各カタログ（コード → 表示名）と、
//! フォールバック用の既知商品テーブルを提供する。
//! セッション開始時に一度読み込み、以降は読み取り専用。

pub mod remote;

use crate::error::{Result, StockScanError};
use crate::matcher::WarehouseItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 合成ラベルの接頭辞（カタログ未登録コード用）
pub const PRODUCT_PREFIX: &str = "Produkt";
pub const COLOR_PREFIX: &str = "Kolor";
pub const SIZE_PREFIX: &str = "Rozmiar";

/// 短い位置コード → 表示名のマッピング
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// フラットなJSONオブジェクト（{"020": "Kurtka", ...}）から読み込み
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| StockScanError::InvalidCatalog(format!("{}: {}", path.display(), e)))?;
        Ok(Self { entries })
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// カタログを引き、未登録なら `<prefix>_<code>` を合成する
///
/// デコード処理はコード未登録でも失敗しない。
pub fn label_or_synthesized(catalog: &Catalog, code: &str, prefix: &str) -> String {
    match catalog.get(code) {
        Some(label) => label.to_string(),
        None => format!("{}_{}", prefix, code),
    }
}

/// セッションで使う参照カタログ一式
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    pub stock: Catalog,
    pub color: Catalog,
    pub size: Catalog,
    pub bag: Catalog,
    pub wallet: Catalog,
}

impl CatalogSet {
    /// ディレクトリ内の {stock,color,size,bag,wallet}.json を読み込む
    ///
    /// 個別ファイルの欠落は警告のみ（空カタログとして扱う）。
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            return Err(StockScanError::FileNotFound(dir.display().to_string()));
        }

        Ok(Self {
            stock: Self::load_one(dir, "stock")?,
            color: Self::load_one(dir, "color")?,
            size: Self::load_one(dir, "size")?,
            bag: Self::load_one(dir, "bag")?,
            wallet: Self::load_one(dir, "wallet")?,
        })
    }

    fn load_one(dir: &Path, name: &str) -> Result<Catalog> {
        let path = dir.join(format!("{}.json", name));
        if path.exists() {
            Catalog::load(&path)
        } else {
            eprintln!("⚠ カタログがありません: {}（空として扱います）", path.display());
            Ok(Catalog::new())
        }
    }
}

/// 既知商品エントリ（バーコード完全一致フォールバック用）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownItem {
    pub name: String,
    pub size: Option<String>,
}

/// バーコード → 既知商品のテーブル
///
/// 呼び出し側が現在の手持ち在庫などから構築し、
/// デコーダの最終フォールバックでのみ参照される。
#[derive(Debug, Clone, Default)]
pub struct KnownItems {
    entries: HashMap<String, KnownItem>,
}

impl KnownItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// 倉庫リストから構築（同一バーコードは先勝ち）
    pub fn from_warehouse(items: &[WarehouseItem]) -> Self {
        let mut entries = HashMap::new();
        for item in items {
            entries
                .entry(item.barcode.clone())
                .or_insert_with(|| KnownItem {
                    name: item.name.clone(),
                    size: item.size.clone(),
                });
        }
        Self { entries }
    }

    pub fn insert(&mut self, barcode: String, name: String, size: Option<String>) {
        self.entries.insert(barcode, KnownItem { name, size });
    }

    pub fn get(&self, barcode: &str) -> Option<&KnownItem> {
        self.entries.get(barcode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
