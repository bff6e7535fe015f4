use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stock-scan")]
#[command(about = "バーコード解析・在庫照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 生コードを1件デコードして表示
    Decode {
        /// スキャン済みの生コード
        #[arg(required = true)]
        code: String,

        /// カタログディレクトリ（デフォルト: 設定のcatalog_dir）
        #[arg(short, long)]
        catalogs: Option<PathBuf>,

        /// 倉庫リストJSON（フォールバック表の構築に使用）
        #[arg(short, long)]
        warehouse: Option<PathBuf>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 保留リストと倉庫リストを照合してレポートを出力
    Reconcile {
        /// 保留アイテムJSONファイル
        #[arg(short, long, required = true)]
        pending: PathBuf,

        /// 倉庫リストJSONファイル
        #[arg(short, long, required = true)]
        warehouse: PathBuf,

        /// レポート出力先JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 対話式スキャンセッション（スキャン → 照合）
    Scan {
        /// 倉庫リストJSONファイル
        #[arg(short, long, required = true)]
        warehouse: PathBuf,

        /// カタログディレクトリ（デフォルト: 設定のcatalog_dir）
        #[arg(short, long)]
        catalogs: Option<PathBuf>,

        /// レポート出力先JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定の表示・変更
    Config {
        /// 残品カタログのエンドポイントURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// リモート取得のタイムアウト秒を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
