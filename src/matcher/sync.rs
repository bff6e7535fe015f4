//! 消込集合の導出モジュール
//!
//! 照合結果からUI表示用（グレーアウト）の倉庫id集合を導出する。
//! 純粋関数のみ。ペアリストにも元の倉庫リストにも触らない。

use super::MatchedPair;
use std::collections::HashSet;

/// ペアリストから消込済み倉庫id集合を導出する
///
/// 同じ入力に対して常に同じ集合を返す（再計算しても安全）。
pub fn derive_consumed_ids(pairs: &[MatchedPair]) -> HashSet<u64> {
    pairs.iter().map(|p| p.warehouse_id).collect()
}

/// 指定idを除いた新しい消込集合を返す
///
/// idが集合に無ければ内容は変わらない。ペアリスト自体は解消しない
/// （ペアの解消が必要なら呼び出し側が別途 pairs から除く）。
pub fn unpair(consumed: &HashSet<u64>, id: u64) -> HashSet<u64> {
    let mut next = consumed.clone();
    next.remove(&id);
    next
}
