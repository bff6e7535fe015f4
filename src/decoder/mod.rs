//! バーコードデコーダモジュール
//!
//! スキャン済みの生コードを固定幅の符号化スキームで解釈し、
//! 商品アイデンティティ（名前・サイズ・区分）に変換する。
//!
//! ## スキーム優先順位（最初に一致したものが勝ち）
//! 1. 残品（リモートカタログ参照あり）
//! 2. バッグ
//! 3. 財布
//! 4. ジャケット
//! 5. フォールバック（既知商品テーブルの完全一致）
//!
//! どの入力に対しても失敗しない。解釈できないコードは
//! `Unrecognized` に退避する。

pub mod schemes;

use crate::catalog::remote::RemainingCatalog;
use crate::catalog::{CatalogSet, KnownItems};
use serde::{Deserialize, Serialize};

/// 未解決コードの表示名
pub const NOT_FOUND_LABEL: &str = "Nie znaleziono produktu";

/// デコード結果の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodedKind {
    RemainingProduct,
    Bag,
    Wallet,
    Jacket,
    Unrecognized,
}

impl std::fmt::Display for DecodedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodedKind::RemainingProduct => write!(f, "残品"),
            DecodedKind::Bag => write!(f, "バッグ"),
            DecodedKind::Wallet => write!(f, "財布"),
            DecodedKind::Jacket => write!(f, "ジャケット"),
            DecodedKind::Unrecognized => write!(f, "不明"),
        }
    }
}

/// デコード済み商品アイデンティティ（値型、呼び出しごとに新規生成）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedIdentity {
    pub name: String,
    /// サイズ無し区分（バッグ・財布・残品）では None
    pub size: Option<String>,
    pub category: DecodedKind,
}

/// 生コードをデコードする
///
/// スキーム1のリモート参照が唯一のサスペンションポイント。
/// 前提条件（長さ・接頭辞）を満たさない場合はリモート参照自体を
/// 行わないため、通常のスキャンで余分なラウンドトリップは発生しない。
pub async fn decode(
    raw: &str,
    catalogs: &CatalogSet,
    remaining: &RemainingCatalog,
    known: &KnownItems,
) -> DecodedIdentity {
    let raw = raw.trim();

    if let Some(identity) = schemes::remaining_product(raw, catalogs, remaining).await {
        return identity;
    }
    if let Some(identity) = schemes::bag(raw, catalogs) {
        return identity;
    }
    if let Some(identity) = schemes::wallet(raw, catalogs) {
        return identity;
    }
    if let Some(identity) = schemes::jacket(raw, catalogs) {
        return identity;
    }

    schemes::fallback(raw, known)
}
