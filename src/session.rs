//! 対話式スキャンセッションモジュール
//!
//! スキャナ入力（生コード）を1件ずつデコードして表示し、
//! 確定したものを保留アイテムとして積み上げる。終了時に
//! 倉庫リストと照合し、レポートを表示・保存する。
//!
//! スキャンは1件ずつ順次処理する（デコード完了まで次の入力を
//! 受け付けない）。

use crate::catalog::remote::RemainingCatalog;
use crate::catalog::{CatalogSet, KnownItems};
use crate::decoder::{self, DecodedIdentity};
use crate::error::{Result, StockScanError};
use crate::matcher::{
    self, MatchResult, MatchedPair, PendingItem, PendingKind, WarehouseItem,
};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 照合レポート（reconcileコマンドとスキャンセッションで共用）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub generated_at: String,
    pub pending_count: usize,
    pub pair_count: usize,
    pub unpaired_pending: usize,
    pub pairs: Vec<MatchedPair>,
    /// 消込済み倉庫id（表示安定のためソート済み）
    pub consumed_ids: Vec<u64>,
}

impl ReconciliationReport {
    pub fn build(pending: &[PendingItem], result: &MatchResult) -> Self {
        let mut consumed_ids: Vec<u64> =
            matcher::derive_consumed_ids(&result.pairs).into_iter().collect();
        consumed_ids.sort_unstable();

        Self {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            pending_count: pending.len(),
            pair_count: result.pairs.len(),
            unpaired_pending: pending.len() - result.pairs.len(),
            pairs: result.pairs.clone(),
            consumed_ids,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// 倉庫リストJSONを読み込む（読み込み時に正規化）
pub fn load_warehouse_file(path: &Path) -> Result<Vec<WarehouseItem>> {
    if !path.exists() {
        return Err(StockScanError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let mut items: Vec<WarehouseItem> = serde_json::from_str(&content)?;
    for item in &mut items {
        item.normalize();
    }
    Ok(items)
}

/// 保留リストJSONを読み込む（読み込み時に正規化）
pub fn load_pending_file(path: &Path) -> Result<Vec<PendingItem>> {
    if !path.exists() {
        return Err(StockScanError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let mut items: Vec<PendingItem> = serde_json::from_str(&content)?;
    for item in &mut items {
        item.normalize();
    }
    Ok(items)
}

/// スキャン後の操作
enum ScanAction {
    /// 販売として追加
    AddSale,
    /// 移動として追加
    AddTransfer,
    /// このスキャンを破棄
    Discard,
    /// 照合して終了
    Quit,
}

/// 対話式スキャンセッションを実行
pub async fn run_interactive_session(
    catalogs: &CatalogSet,
    remaining: &RemainingCatalog,
    warehouse: &[WarehouseItem],
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let known = KnownItems::from_warehouse(warehouse);

    println!("📦 在庫照合セッション（倉庫: {}点）", warehouse.len());
    println!("---");
    println!("操作: バーコード入力後 [Enter]販売 [t]移動 [s]破棄 / コード欄で [q]照合して終了");
    println!("---\n");

    let mut pending: Vec<PendingItem> = Vec::new();

    loop {
        let code: String = Input::new()
            .with_prompt("バーコード (q:終了)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| StockScanError::CliExecution(e.to_string()))?;

        let code = code.trim().to_string();
        if code.is_empty() {
            continue;
        }
        if code == "q" || code == "Q" {
            break;
        }

        let identity = decoder::decode(&code, catalogs, remaining, &known).await;
        print_identity(&identity, verbose);

        match prompt_scan_action()? {
            ScanAction::AddSale => {
                pending.push(PendingItem::from_decoded(PendingKind::Sale, &identity, &code));
                println!("  → 販売として追加（計{}件）\n", pending.len());
            }
            ScanAction::AddTransfer => {
                pending.push(PendingItem::from_decoded(
                    PendingKind::Transfer,
                    &identity,
                    &code,
                ));
                println!("  → 移動として追加（計{}件）\n", pending.len());
            }
            ScanAction::Discard => {
                println!("  → 破棄\n");
            }
            ScanAction::Quit => break,
        }
    }

    if pending.is_empty() {
        println!("\n保留アイテムがありません。照合をスキップします");
        return Ok(());
    }

    // 照合
    println!("\n🔗 照合中... ({}件 vs 倉庫{}点)", pending.len(), warehouse.len());
    let result = matcher::match_items(&pending, warehouse);
    let mut consumed = matcher::derive_consumed_ids(&result.pairs);

    println!("✔ ペア確定: {}件 / 未ペア: {}件\n", result.pairs.len(), pending.len() - result.pairs.len());
    for pair in &result.pairs {
        println!(
            "  {} {} → 倉庫id {}",
            pair.pending.name,
            pair.pending.size.as_deref().unwrap_or("-"),
            pair.warehouse_id
        );
    }

    // 消込解除（任意）
    loop {
        let input: String = Input::new()
            .with_prompt("消込を解除する倉庫id (Enter:なし)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| StockScanError::CliExecution(e.to_string()))?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }
        match input.parse::<u64>() {
            Ok(id) => {
                consumed = matcher::unpair(&consumed, id);
                println!("  → 消込: {}点", consumed.len());
            }
            Err(_) => println!("  ⚠ 数値を入力してください"),
        }
    }

    // レポート保存
    let report = ReconciliationReport::build(&pending, &result);
    if let Some(path) = output {
        report.save(path)?;
        println!("\n✓ レポートを保存: {}", path.display());
    }

    Ok(())
}

fn print_identity(identity: &DecodedIdentity, verbose: bool) {
    println!("  [{}] {}", identity.category, identity.name);
    if let Some(size) = &identity.size {
        println!("  サイズ: {}", size);
    }
    if verbose {
        println!("  (category={:?})", identity.category);
    }
}

fn prompt_scan_action() -> Result<ScanAction> {
    let input: String = Input::new()
        .with_prompt("追加 (Enter:販売 t:移動 s:破棄 q:終了)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| StockScanError::CliExecution(e.to_string()))?;

    match input.trim() {
        "" => Ok(ScanAction::AddSale),
        "t" | "T" => Ok(ScanAction::AddTransfer),
        "s" | "S" => Ok(ScanAction::Discard),
        "q" | "Q" => Ok(ScanAction::Quit),
        _ => Ok(ScanAction::Discard),
    }
}
