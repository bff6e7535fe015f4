//! 在庫照合モジュール
//!
//! 保留アイテムと倉庫在庫の 1:1 ペアリングを計算する。
//!
//! ## アルゴリズム
//! - 保留側を入力順に走査し、各アイテムについて倉庫側を入力順に走査
//! - 最初に述語を満たした候補で確定（first-fit greedy、O(P·W)）
//! - 両側とも一度ペアになったインデックスは再利用しない
//!
//! 大域最適の二部マッチングは行わない。倉庫リストが入荷日順であれば
//! first-fit がそのまま「古い在庫から払い出す」挙動になる。
//! 結果は入力順にのみ依存し、同一入力に対して常に同一。

pub mod sync;
mod types;

pub use sync::{derive_consumed_ids, unpair};
pub use types::{
    MatchResult, MatchedPair, PendingItem, PendingItemView, PendingKind, WarehouseItem,
};

use std::collections::HashSet;

/// 照合述語
///
/// - 販売: バーコード・商品名・サイズの完全一致
/// - 移動: バーコードが一致しない場合はバーコードを無視して
///   商品名＋サイズで判定（移動記録はバーコード欄に内部参照を
///   持つことがある）。バーコードがたまたま一致する移動は
///   厳密経路を通るが、その場合バーコード条件は自明に成立する。
///
/// サイズは `None == None` を一致とみなす（バッグ等のサイズ無し区分）。
pub fn matches_warehouse_item(pending: &PendingItem, warehouse: &WarehouseItem) -> bool {
    let barcode_eq = pending.barcode == warehouse.barcode;
    let name_eq = pending.name == warehouse.name;
    let size_eq = pending.size == warehouse.size;

    let relaxed_barcode = pending.kind == PendingKind::Transfer && !barcode_eq;

    if relaxed_barcode {
        name_eq && size_eq
    } else {
        barcode_eq && name_eq && size_eq
    }
}

/// 保留アイテムと倉庫在庫を照合する
///
/// 入力は変更しない。結果の集合は呼び出しごとに新しく確保する。
/// 「一致なし」は結果からの欠落で表現され、エラーにはならない。
pub fn match_items(pending: &[PendingItem], warehouse: &[WarehouseItem]) -> MatchResult {
    let mut pairs = Vec::new();
    let mut paired_pending: HashSet<usize> = HashSet::new();
    let mut paired_warehouse: HashSet<usize> = HashSet::new();

    for (b, item) in pending.iter().enumerate() {
        if paired_pending.contains(&b) {
            continue;
        }

        for (w, stock) in warehouse.iter().enumerate() {
            if paired_warehouse.contains(&w) {
                continue;
            }

            if matches_warehouse_item(item, stock) {
                pairs.push(MatchedPair {
                    pending: PendingItemView::from(item),
                    warehouse_id: stock.id,
                });
                paired_pending.insert(b);
                paired_warehouse.insert(w);
                break; // 1:1を保証（このアイテムの走査を打ち切る）
            }
        }
    }

    MatchResult {
        pairs,
        paired_pending,
        paired_warehouse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(kind: PendingKind, name: &str, size: Option<&str>, barcode: &str) -> PendingItem {
        PendingItem {
            kind,
            name: name.into(),
            size: size.map(String::from),
            barcode: barcode.into(),
        }
    }

    fn stock(id: u64, name: &str, size: Option<&str>, barcode: &str) -> WarehouseItem {
        WarehouseItem {
            id,
            name: name.into(),
            size: size.map(String::from),
            barcode: barcode.into(),
            price: 0.0,
        }
    }

    #[test]
    fn test_transfer_ignores_barcode() {
        let pending_items = vec![pending(
            PendingKind::Transfer,
            "Kurtka A",
            Some("L"),
            "INTERNAL_ID",
        )];
        let warehouse = vec![stock(1, "Kurtka A", Some("L"), "EAN1")];

        let result = match_items(&pending_items, &warehouse);
        assert_eq!(result.pairs.len(), 1);
        assert_eq!(result.pairs[0].warehouse_id, 1);
    }

    #[test]
    fn test_sale_requires_exact_barcode() {
        let warehouse = vec![stock(1, "Kurtka A", Some("L"), "EAN1")];

        let hit = vec![pending(PendingKind::Sale, "Kurtka A", Some("L"), "EAN1")];
        assert_eq!(match_items(&hit, &warehouse).pairs.len(), 1);

        let miss = vec![pending(PendingKind::Sale, "Kurtka A", Some("L"), "WRONG")];
        assert_eq!(match_items(&miss, &warehouse).pairs.len(), 0);
    }

    #[test]
    fn test_sizeless_items_match() {
        // バッグなどサイズ無し区分: None == None を一致とみなす
        let pending_items = vec![pending(PendingKind::Sale, "Torebka X", None, "EAN7")];
        let warehouse = vec![stock(3, "Torebka X", None, "EAN7")];

        let result = match_items(&pending_items, &warehouse);
        assert_eq!(result.pairs.len(), 1);
    }

    #[test]
    fn test_size_mismatch_never_pairs() {
        let pending_items = vec![pending(PendingKind::Transfer, "Kurtka A", Some("M"), "X")];
        let warehouse = vec![stock(1, "Kurtka A", Some("L"), "EAN1")];

        let result = match_items(&pending_items, &warehouse);
        assert!(result.pairs.is_empty());
        assert!(result.paired_pending.is_empty());
        assert!(result.paired_warehouse.is_empty());
    }

    #[test]
    fn test_two_sales_two_units() {
        let pending_items = vec![
            pending(PendingKind::Sale, "Kurtka A", Some("M"), "EAN1"),
            pending(PendingKind::Sale, "Kurtka A", Some("M"), "EAN2"),
        ];
        let warehouse = vec![
            stock(1, "Kurtka A", Some("M"), "EAN1"),
            stock(2, "Kurtka A", Some("M"), "EAN2"),
        ];

        let result = match_items(&pending_items, &warehouse);
        assert_eq!(result.pairs.len(), 2);
        assert_eq!(result.pairs[0].warehouse_id, 1);
        assert_eq!(result.pairs[1].warehouse_id, 2);
    }

    #[test]
    fn test_first_fit_takes_earliest_unit() {
        // 同一商品が2点 → 先頭の在庫に確定する（入荷日順なら古い方）
        let pending_items = vec![pending(PendingKind::Transfer, "Kurtka A", Some("L"), "REF")];
        let warehouse = vec![
            stock(10, "Kurtka A", Some("L"), "EAN1"),
            stock(11, "Kurtka A", Some("L"), "EAN2"),
        ];

        let result = match_items(&pending_items, &warehouse);
        assert_eq!(result.pairs.len(), 1);
        assert_eq!(result.pairs[0].warehouse_id, 10);
    }

    #[test]
    fn test_no_warehouse_unit_consumed_twice() {
        // 保留2点に対し在庫1点 → 2点目は未ペアのまま
        let pending_items = vec![
            pending(PendingKind::Transfer, "Kurtka A", Some("L"), "R1"),
            pending(PendingKind::Transfer, "Kurtka A", Some("L"), "R2"),
        ];
        let warehouse = vec![stock(1, "Kurtka A", Some("L"), "EAN1")];

        let result = match_items(&pending_items, &warehouse);
        assert_eq!(result.pairs.len(), 1);
        assert!(result.paired_pending.contains(&0));
        assert!(!result.paired_pending.contains(&1));
    }

    #[test]
    fn test_predicate_soundness() {
        // 生成された全ペアについて述語を再評価すると必ず真
        let pending_items = vec![
            pending(PendingKind::Transfer, "Kurtka A", Some("L"), "REF"),
            pending(PendingKind::Sale, "Torebka X", None, "EAN7"),
            pending(PendingKind::Sale, "Portfel Y", None, "NOPE"),
        ];
        let warehouse = vec![
            stock(1, "Torebka X", None, "EAN7"),
            stock(2, "Kurtka A", Some("L"), "EAN1"),
        ];

        let result = match_items(&pending_items, &warehouse);
        for pair in &result.pairs {
            let p = pending_items
                .iter()
                .find(|pi| PendingItemView::from(*pi).barcode == pair.pending.barcode)
                .unwrap();
            let w = warehouse.iter().find(|wi| wi.id == pair.warehouse_id).unwrap();
            assert!(matches_warehouse_item(p, w));
        }
    }
}
