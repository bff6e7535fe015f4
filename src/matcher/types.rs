//! 照合対象の型定義
//!
//! 保留アイテム（移動・販売予定）と倉庫在庫は読み込み時に一度だけ
//! 正規化し、比較時には形状チェックを繰り返さない。

use crate::decoder::DecodedIdentity;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 保留アイテムの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingKind {
    /// 店舗間移動
    Transfer,
    /// 販売
    Sale,
}

/// 保留アイテム（倉庫在庫1点と結び付けたい1単位）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingItem {
    pub kind: PendingKind,
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    pub barcode: String,
}

impl PendingItem {
    /// デコード結果から構築（kindとバーコードは呼び出し側が与える）
    pub fn from_decoded(kind: PendingKind, identity: &DecodedIdentity, barcode: &str) -> Self {
        let mut item = Self {
            kind,
            name: identity.name.clone(),
            size: identity.size.clone(),
            barcode: barcode.to_string(),
        };
        item.normalize();
        item
    }

    /// 境界での正規化（前後空白の除去、空サイズ → None）
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.barcode = self.barcode.trim().to_string();
        self.size = normalize_size(self.size.take());
    }
}

/// 倉庫在庫の1点
///
/// 照合処理はこの構造体を書き換えない（idでの参照のみ）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    pub barcode: String,
    #[serde(default)]
    pub price: f64,
}

impl WarehouseItem {
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.barcode = self.barcode.trim().to_string();
        self.size = normalize_size(self.size.take());
    }
}

/// 空文字・空白のみのサイズはサイズ無しとして扱う
fn normalize_size(size: Option<String>) -> Option<String> {
    match size {
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}

/// ペア確定後に下流が参照するフィールドのスナップショット
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingItemView {
    pub kind: PendingKind,
    pub name: String,
    pub size: Option<String>,
    pub barcode: String,
}

impl From<&PendingItem> for PendingItemView {
    fn from(item: &PendingItem) -> Self {
        Self {
            kind: item.kind,
            name: item.name.clone(),
            size: item.size.clone(),
            barcode: item.barcode.clone(),
        }
    }
}

/// 確定した1ペア
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedPair {
    pub pending: PendingItemView,
    pub warehouse_id: u64,
}

/// 照合結果
///
/// ペアのリストと、ペア済みインデックス集合（両側）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchResult {
    pub pairs: Vec<MatchedPair>,
    pub paired_pending: HashSet<usize>,
    pub paired_warehouse: HashSet<usize>,
}
