//! デコーダ機能テスト
//!
//! スキーム優先順位とカタログ読み込みを通したデコードを検証。
//! リモートカタログは preloaded を使い、ネットワークには出ない。

use std::collections::HashMap;
use stock_scan_rust::catalog::remote::RemainingCatalog;
use stock_scan_rust::catalog::{Catalog, CatalogSet, KnownItems};
use stock_scan_rust::decoder::{self, DecodedKind, NOT_FOUND_LABEL};
use stock_scan_rust::matcher::WarehouseItem;
use tempfile::tempdir;

fn write_catalog(dir: &std::path::Path, name: &str, entries: &[(&str, &str)]) {
    let map: HashMap<&str, &str> = entries.iter().copied().collect();
    let json = serde_json::to_string_pretty(&map).expect("カタログのシリアライズ失敗");
    std::fs::write(dir.join(format!("{}.json", name)), json).expect("カタログ書き込み失敗");
}

fn full_catalog_dir() -> tempfile::TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    write_catalog(dir.path(), "stock", &[("020", "Kurtka skórzana")]);
    write_catalog(dir.path(), "color", &[("60", "Czarny"), ("12", "Brązowy")]);
    write_catalog(dir.path(), "size", &[("010", "L")]);
    write_catalog(dir.path(), "bag", &[("1230", "Torebka miejska")]);
    write_catalog(dir.path(), "wallet", &[("450", "Portfel klasyczny")]);
    dir
}

fn remaining() -> RemainingCatalog {
    let catalog: Catalog = [("09".to_string(), "Pasek".to_string())].into_iter().collect();
    RemainingCatalog::preloaded(catalog)
}

/// シナリオ5: ジャケットコードのデコード（名前にサイズを含めない）
#[tokio::test]
async fn test_jacket_decode_through_loaded_catalogs() {
    let dir = full_catalog_dir();
    let catalogs = CatalogSet::load_dir(dir.path()).expect("カタログ読み込み失敗");

    let identity =
        decoder::decode("0206001000009", &catalogs, &remaining(), &KnownItems::new()).await;

    assert_eq!(identity.category, DecodedKind::Jacket);
    assert_eq!(identity.name, "Kurtka skórzana Czarny");
    assert_eq!(identity.size, Some("L".into()));
}

/// 残品コードはリモートカタログと色カタログで解決する
#[tokio::test]
async fn test_remaining_product_decode() {
    let dir = full_catalog_dir();
    let catalogs = CatalogSet::load_dir(dir.path()).expect("カタログ読み込み失敗");

    let identity = decoder::decode("000600009", &catalogs, &remaining(), &KnownItems::new()).await;

    assert_eq!(identity.category, DecodedKind::RemainingProduct);
    assert_eq!(identity.name, "Pasek Czarny");
    assert_eq!(identity.size, None);
}

/// スキーム優先: ジャケットの正規表現形でも接頭辞000ならバッグが勝つ
#[tokio::test]
async fn test_bag_scheme_wins_over_jacket_shape() {
    let dir = full_catalog_dir();
    let catalogs = CatalogSet::load_dir(dir.path()).expect("カタログ読み込み失敗");

    let identity =
        decoder::decode("0001230600000", &catalogs, &remaining(), &KnownItems::new()).await;

    assert_eq!(identity.category, DecodedKind::Bag);
    assert_eq!(identity.name, "Torebka miejska Czarny");
}

/// 財布コードのデコード
#[tokio::test]
async fn test_wallet_decode() {
    let dir = full_catalog_dir();
    let catalogs = CatalogSet::load_dir(dir.path()).expect("カタログ読み込み失敗");

    let identity =
        decoder::decode("0000450600000", &catalogs, &remaining(), &KnownItems::new()).await;

    assert_eq!(identity.category, DecodedKind::Wallet);
    assert_eq!(identity.name, "Portfel klasyczny Czarny");
    assert_eq!(identity.size, None);
}

/// フォールバック: 既知商品テーブルの完全一致でベストエフォート名を返す
#[tokio::test]
async fn test_fallback_uses_known_items() {
    let dir = full_catalog_dir();
    let catalogs = CatalogSet::load_dir(dir.path()).expect("カタログ読み込み失敗");

    let warehouse = vec![WarehouseItem {
        id: 1,
        name: "Kurtka A".into(),
        size: Some("L".into()),
        barcode: "5901234123457".into(),
        price: 100.0,
    }];
    let known = KnownItems::from_warehouse(&warehouse);

    let identity = decoder::decode("5901234123457", &catalogs, &remaining(), &known).await;

    assert_eq!(identity.category, DecodedKind::Unrecognized);
    assert_eq!(identity.name, "Kurtka A L");
    assert_eq!(identity.size, Some("L".into()));
}

/// どのスキームにも一致しない → Unrecognized（エラーにはならない）
#[tokio::test]
async fn test_unrecognized_code() {
    let dir = full_catalog_dir();
    let catalogs = CatalogSet::load_dir(dir.path()).expect("カタログ読み込み失敗");

    let identity = decoder::decode("ABC-123", &catalogs, &remaining(), &KnownItems::new()).await;

    assert_eq!(identity.category, DecodedKind::Unrecognized);
    assert_eq!(identity.name, NOT_FOUND_LABEL);
}

/// カタログファイル欠落 → 空カタログとして読み込み、合成ラベルで解決
#[tokio::test]
async fn test_missing_catalog_files_degrade_to_synthesized() {
    let dir = tempdir().expect("Failed to create temp dir");
    // stockのみ配置、他は欠落
    write_catalog(dir.path(), "stock", &[("020", "Kurtka skórzana")]);
    let catalogs = CatalogSet::load_dir(dir.path()).expect("カタログ読み込み失敗");

    let identity =
        decoder::decode("0206001000009", &catalogs, &remaining(), &KnownItems::new()).await;

    assert_eq!(identity.category, DecodedKind::Jacket);
    assert_eq!(identity.name, "Kurtka skórzana Kolor_60");
    assert_eq!(identity.size, Some("Rozmiar_010".into()));
}

/// リモート取得不能でも残品スキームは合成ラベルで成立する
#[tokio::test]
async fn test_remaining_offline_degradation() {
    let dir = full_catalog_dir();
    let catalogs = CatalogSet::load_dir(dir.path()).expect("カタログ読み込み失敗");
    let offline = RemainingCatalog::new("http://127.0.0.1:1/remaining", 1);

    let identity = decoder::decode("000600009", &catalogs, &offline, &KnownItems::new()).await;

    assert_eq!(identity.category, DecodedKind::RemainingProduct);
    assert_eq!(identity.name, "Produkt_09 Czarny");
}
