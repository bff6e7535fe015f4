//! 符号化スキーム定義
//!
//! 各スキームは入力の固定位置を検査し、前提条件を満たさなければ
//! `None` を返して次のスキームに譲る。副作用を持つのは残品スキームの
//! リモート参照のみで、その失敗もスキーム内で回復する。
//!
//! 接頭辞 `000` はバッグ・財布・残品のために予約されており、
//! ジャケットの在庫コードとしては現れない。

use super::{DecodedIdentity, DecodedKind, NOT_FOUND_LABEL};
use crate::catalog::remote::RemainingCatalog;
use crate::catalog::{
    label_or_synthesized, CatalogSet, KnownItems, COLOR_PREFIX, PRODUCT_PREFIX, SIZE_PREFIX,
};
use regex::Regex;

/// 予約接頭辞（バッグ・財布・残品）
pub const RESERVED_PREFIX: &str = "000";

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn digit_at(raw: &str, idx: usize) -> Option<char> {
    let c = raw.as_bytes().get(idx).copied()?;
    if c.is_ascii_digit() {
        Some(c as char)
    } else {
        None
    }
}

/// スキーム1: 残品
///
/// レイアウト: [000][色2桁][00][品2桁]、長さ9以上。
/// 品コードは残品カタログ（リモート）、色コードは色カタログで解決。
/// リモート取得の失敗・タイムアウトは未登録コードと同じ扱いで、
/// 合成ラベルに退避する（結果の形は変わらない）。
pub async fn remaining_product(
    raw: &str,
    catalogs: &CatalogSet,
    remaining: &RemainingCatalog,
) -> Option<DecodedIdentity> {
    // 前提条件チェック（ここで弾ければリモート参照は行わない）
    if raw.len() < 9 {
        return None;
    }
    if raw.get(0..3)? != RESERVED_PREFIX {
        return None;
    }
    let color_code = raw.get(3..5)?;
    if raw.get(5..7)? != "00" {
        return None;
    }
    let item_code = raw.get(7..9)?;
    if !all_digits(color_code) || !all_digits(item_code) {
        return None;
    }

    let item_label = match remaining.fetch().await {
        Ok(catalog) => label_or_synthesized(&catalog, item_code, PRODUCT_PREFIX),
        Err(e) => {
            eprintln!("⚠ 残品カタログ取得失敗: {}（合成ラベルを使用）", e);
            format!("{}_{}", PRODUCT_PREFIX, item_code)
        }
    };
    let color_label = label_or_synthesized(&catalogs.color, color_code, COLOR_PREFIX);

    Some(DecodedIdentity {
        name: format!("{} {}", item_label, color_label),
        size: None,
        category: DecodedKind::RemainingProduct,
    })
}

/// スキーム2: バッグ
///
/// 長さ13以上、接頭辞000、位置3が非ゼロ（財布との判別点）。
/// 行番号4桁[3..7]をバッグカタログ、色2桁[7..9]を色カタログで解決。
pub fn bag(raw: &str, catalogs: &CatalogSet) -> Option<DecodedIdentity> {
    if raw.len() < 13 {
        return None;
    }
    if raw.get(0..3)? != RESERVED_PREFIX {
        return None;
    }
    if digit_at(raw, 3)? == '0' {
        return None;
    }
    let row_code = raw.get(3..7)?;
    let color_code = raw.get(7..9)?;
    if !all_digits(row_code) || !all_digits(color_code) {
        return None;
    }

    let row_label = label_or_synthesized(&catalogs.bag, row_code, PRODUCT_PREFIX);
    let color_label = label_or_synthesized(&catalogs.color, color_code, COLOR_PREFIX);

    Some(DecodedIdentity {
        name: format!("{} {}", row_label, color_label),
        size: None,
        category: DecodedKind::Bag,
    })
}

/// スキーム3: 財布
///
/// 長さ13ちょうど、接頭辞000、位置3がゼロ・位置4が非ゼロ。
/// 財布番号3桁[4..7]を財布カタログ、色2桁[7..9]を色カタログで解決。
pub fn wallet(raw: &str, catalogs: &CatalogSet) -> Option<DecodedIdentity> {
    if raw.len() != 13 {
        return None;
    }
    if raw.get(0..3)? != RESERVED_PREFIX {
        return None;
    }
    if digit_at(raw, 3)? != '0' {
        return None;
    }
    if digit_at(raw, 4)? == '0' {
        return None;
    }
    let number_code = raw.get(4..7)?;
    let color_code = raw.get(7..9)?;
    if !all_digits(number_code) || !all_digits(color_code) {
        return None;
    }

    let number_label = label_or_synthesized(&catalogs.wallet, number_code, PRODUCT_PREFIX);
    let color_label = label_or_synthesized(&catalogs.color, color_code, COLOR_PREFIX);

    Some(DecodedIdentity {
        name: format!("{} {}", number_label, color_label),
        size: None,
        category: DecodedKind::Wallet,
    })
}

/// スキーム4: ジャケット
///
/// 長さ13ちょうど、[在庫3桁][色2桁][サイズ3桁]0000[1桁]。
/// 在庫コード000は予約領域のため不一致。名前にサイズは含めない
/// （名前を価格検索キーとして使い回すため、サイズは別フィールド）。
pub fn jacket(raw: &str, catalogs: &CatalogSet) -> Option<DecodedIdentity> {
    lazy_static::lazy_static! {
        static ref JACKET_RE: Regex = Regex::new(r"^(\d{3})(\d{2})(\d{3})0000\d$").unwrap();
    }

    let caps = JACKET_RE.captures(raw)?;
    let stock_code = caps.get(1)?.as_str();
    if stock_code == RESERVED_PREFIX {
        return None;
    }
    let color_code = caps.get(2)?.as_str();
    let size_code = caps.get(3)?.as_str();

    let stock_label = label_or_synthesized(&catalogs.stock, stock_code, PRODUCT_PREFIX);
    let color_label = label_or_synthesized(&catalogs.color, color_code, COLOR_PREFIX);
    let size_label = label_or_synthesized(&catalogs.size, size_code, SIZE_PREFIX);

    Some(DecodedIdentity {
        name: format!("{} {}", stock_label, color_label),
        size: Some(size_label),
        category: DecodedKind::Jacket,
    })
}

/// スキーム5: フォールバック
///
/// 既知商品テーブルのバーコード完全一致。ヒットしても区分は
/// `Unrecognized` のまま（符号化としては解釈できていない）で、
/// 名前だけベストエフォートで補う。
pub fn fallback(raw: &str, known: &KnownItems) -> DecodedIdentity {
    match known.get(raw) {
        Some(item) => {
            let name = match &item.size {
                Some(size) => format!("{} {}", item.name, size),
                None => item.name.clone(),
            };
            DecodedIdentity {
                name,
                size: item.size.clone(),
                category: DecodedKind::Unrecognized,
            }
        }
        None => DecodedIdentity {
            name: NOT_FOUND_LABEL.to_string(),
            size: None,
            category: DecodedKind::Unrecognized,
        },
    }
}
