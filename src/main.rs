use clap::Parser;
use stock_scan_rust::catalog::remote::RemainingCatalog;
use stock_scan_rust::catalog::{CatalogSet, KnownItems};
use stock_scan_rust::{cli, config, decoder, error, matcher, session};

use cli::{Cli, Commands};
use config::Config;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Decode { code, catalogs, warehouse, json } => {
            let catalog_dir = catalogs.unwrap_or_else(|| config.catalog_dir.clone());
            let catalog_set = CatalogSet::load_dir(&catalog_dir)?;
            let remaining =
                RemainingCatalog::new(&config.remaining_endpoint, config.timeout_seconds);

            // 倉庫リストがあればフォールバック表を構築
            let known = match warehouse {
                Some(path) => {
                    let items = session::load_warehouse_file(&path)?;
                    KnownItems::from_warehouse(&items)
                }
                None => KnownItems::new(),
            };

            if cli.verbose {
                println!(
                    "カタログ: 在庫{} 色{} サイズ{} バッグ{} 財布{} / 既知商品{}",
                    catalog_set.stock.len(),
                    catalog_set.color.len(),
                    catalog_set.size.len(),
                    catalog_set.bag.len(),
                    catalog_set.wallet.len(),
                    known.len()
                );
            }

            let identity = decoder::decode(&code, &catalog_set, &remaining, &known).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&identity)?);
            } else {
                println!("[{}] {}", identity.category, identity.name);
                if let Some(size) = &identity.size {
                    println!("サイズ: {}", size);
                }
            }
        }

        Commands::Reconcile { pending, warehouse, output } => {
            println!("🔗 stock-scan - 在庫照合\n");

            // 1. 読み込み
            println!("[1/3] リストを読み込み中...");
            let pending_items = session::load_pending_file(&pending)?;
            let warehouse_items = session::load_warehouse_file(&warehouse)?;
            println!(
                "✔ 保留{}件 / 倉庫{}点\n",
                pending_items.len(),
                warehouse_items.len()
            );

            // 2. 照合
            println!("[2/3] 照合中...");
            let result = matcher::match_items(&pending_items, &warehouse_items);
            println!(
                "✔ ペア確定: {}件 / 未ペア: {}件\n",
                result.pairs.len(),
                pending_items.len() - result.pairs.len()
            );

            if cli.verbose {
                for pair in &result.pairs {
                    println!(
                        "  {} {} → 倉庫id {}",
                        pair.pending.name,
                        pair.pending.size.as_deref().unwrap_or("-"),
                        pair.warehouse_id
                    );
                }
            }

            // 3. レポート出力
            println!("[3/3] レポートを出力中...");
            let report = session::ReconciliationReport::build(&pending_items, &result);
            match output {
                Some(path) => {
                    report.save(&path)?;
                    println!("✔ レポートを保存: {}", path.display());
                }
                None => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }

            println!("\n✅ 照合完了");
        }

        Commands::Scan { warehouse, catalogs, output } => {
            println!("📸 stock-scan - スキャンセッション\n");

            let catalog_dir = catalogs.unwrap_or_else(|| config.catalog_dir.clone());
            let catalog_set = CatalogSet::load_dir(&catalog_dir)?;
            let remaining =
                RemainingCatalog::new(&config.remaining_endpoint, config.timeout_seconds);
            let warehouse_items = session::load_warehouse_file(&warehouse)?;

            session::run_interactive_session(
                &catalog_set,
                &remaining,
                &warehouse_items,
                output.as_deref(),
                cli.verbose,
            )
            .await?;

            println!("\n✅ セッション終了");
        }

        Commands::Config { set_endpoint, set_timeout, show } => {
            let mut config = config;

            if let Some(url) = set_endpoint {
                config.set_remaining_endpoint(url)?;
                println!("✔ エンドポイントを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ タイムアウトを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.remaining_endpoint);
                println!("  カタログ: {}", config.catalog_dir.display());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}
