use alpha_crypto_core::utils::DisplayFormatter;
use alpha_crypto_core::{ContentFilter, Resolver, ResolverConfig};
use std::error::Error;
use std::io::{self, Write};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Alpha Crypto content resolver");

    let resolver = Resolver::with_live_sources(ResolverConfig::default());
    let display = DisplayFormatter::new();

    println!("=== Alpha Crypto Content Resolver ===");
    println!("Commands:");
    println!("  prices               - Current spot prices");
    println!("  stats                - Aggregated market stats");
    println!("  feargreed            - Fear & greed index");
    println!("  global               - Global market data");
    println!("  stablecoins          - Stablecoin overview");
    println!("  tvl                  - DeFi TVL");
    println!("  indices              - Composite market indices");
    println!("  movers               - Top gainers and losers");
    println!("  chart <coin-id>      - 7-day price history");
    println!("  articles [category]  - Published articles");
    println!("  article <id>         - One article");
    println!("  airdrops [status]    - Tracked airdrops");
    println!("  airdrop <id>         - One airdrop");
    println!("  signals              - Early signals");
    println!("  exit                 - Exit");

    let mut input = String::new();
    loop {
        input.clear();
        print!("> ");
        io::stdout().flush()?;
        io::stdin().read_line(&mut input)?;

        let mut parts = input.trim().splitn(2, ' ');
        let command = parts.next().unwrap_or("");
        let arg = parts.next().map(str::trim).unwrap_or("");

        match command {
            "" => {}
            "exit" => {
                debug!("Received exit command");
                break;
            }
            "prices" => {
                let prices = resolver.resolve_prices().await;
                println!("{}", display.format_header("Spot Prices"));
                println!("{}", display.format_price_table(&prices));
            }
            "stats" => {
                let stats = resolver.market_stats().await;
                println!("{}", display.format_market_stats(&stats));
            }
            "feargreed" => {
                let index = resolver.resolve_fear_greed().await;
                println!("Fear & Greed: {}", display.format_fear_greed(&index));
            }
            "global" => {
                let global = resolver.resolve_global().await;
                println!("{}", display.format_header("Global Market"));
                println!(
                    "Market Cap: {} ({})",
                    display.format_currency(global.total_market_cap_usd),
                    display.format_colored_change(global.market_cap_change_24h)
                );
                println!(
                    "24h Volume: {}",
                    display.format_currency(global.total_volume_24h_usd)
                );
                println!(
                    "Dominance: BTC {:.1}% / ETH {:.1}%",
                    global.btc_dominance, global.eth_dominance
                );
                println!("Active Cryptos: {}", global.active_cryptocurrencies);
            }
            "stablecoins" => {
                let overview = resolver.resolve_stablecoins().await;
                println!("{}", display.format_header("Stablecoins"));
                println!(
                    "Total Supply: {} (source: {})",
                    display.format_currency(overview.total_market_cap),
                    overview.source
                );
                let rows: Vec<Vec<String>> = overview
                    .top_stablecoins
                    .iter()
                    .map(|s| {
                        vec![
                            s.symbol.clone(),
                            s.name.clone(),
                            display.format_currency(s.market_cap),
                            format!("{:.1}%", s.percentage),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    display.format_table(&["Symbol", "Name", "Supply", "Share"], &rows)
                );
            }
            "tvl" => {
                let tvl = resolver.resolve_defi_tvl().await;
                println!("{}", display.format_header("DeFi TVL"));
                println!(
                    "Total: {} ({})",
                    display.format_currency(tvl.total_tvl),
                    display.format_colored_change(tvl.change_24h)
                );
                for protocol in &tvl.top_protocols {
                    println!(
                        "  {} - {}",
                        protocol.name,
                        display.format_currency(protocol.tvl)
                    );
                }
            }
            "indices" => {
                let indices = resolver.resolve_market_indices().await;
                println!("{}", display.format_header("Market Indices"));
                println!(
                    "Rainbow: {} ({})",
                    indices.bitcoin_rainbow.current_position, indices.bitcoin_rainbow.price_band
                );
                println!(
                    "Altseason: {} ({})",
                    indices.altcoin_season_index.value, indices.altcoin_season_index.status
                );
                println!(
                    "DeFi TVL: {}",
                    display.format_currency(indices.defi_tvl.total_tvl)
                );
                println!(
                    "Stablecoin Dominance: {:.2}%",
                    indices.stablecoin_dominance.percentage
                );
            }
            "movers" => {
                let movers = resolver.resolve_gainers_losers();
                println!("{}", display.format_header("Top Movers"));
                let row = |m: &alpha_crypto_core::models::Mover| {
                    vec![
                        m.symbol.clone(),
                        m.name.clone(),
                        display.format_currency(m.price),
                        display.format_colored_change(m.change_24h),
                    ]
                };
                let rows: Vec<Vec<String>> = movers.gainers.iter().map(row).collect();
                println!(
                    "{}",
                    display.format_table(&["Symbol", "Name", "Price", "24h"], &rows)
                );
                let rows: Vec<Vec<String>> = movers.losers.iter().map(row).collect();
                println!(
                    "{}",
                    display.format_table(&["Symbol", "Name", "Price", "24h"], &rows)
                );
            }
            "chart" => {
                let coin_id = if arg.is_empty() { "bitcoin" } else { arg };
                let chart = resolver.resolve_chart(coin_id).await;
                println!("{}", display.format_header(&format!("{} (7d)", coin_id)));
                for point in chart.iter().rev().take(7).rev() {
                    println!("  {} {}", point.timestamp, display.format_currency(point.price));
                }
            }
            "articles" => {
                let filter = ContentFilter::default().with_category(arg);
                let articles = resolver.resolve_articles(&filter).await;
                println!("{}", display.format_header("Articles"));
                for article in &articles {
                    let marker = if article.premium { "[premium] " } else { "" };
                    println!("  {} {}{} ({})", article.id, marker, article.title, article.category);
                }
            }
            "article" => match resolver.resolve_article(arg).await {
                Ok(article) => {
                    println!("{}", display.format_header(&article.title));
                    println!("{}", article.excerpt);
                    println!("\n{}", article.content);
                }
                Err(err) => println!("{}", err),
            },
            "airdrops" => {
                let filter = ContentFilter::default().with_status(arg);
                let airdrops = resolver.resolve_airdrops(&filter).await;
                println!("{}", display.format_header("Airdrops"));
                let rows: Vec<Vec<String>> = airdrops
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.clone(),
                            a.project_name.clone(),
                            a.status.clone(),
                            a.difficulty.clone(),
                            a.estimated_reward.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    display.format_table(&["Id", "Project", "Status", "Difficulty", "Reward"], &rows)
                );
            }
            "airdrop" => match resolver.resolve_airdrop(arg).await {
                Ok(airdrop) => {
                    println!("{}", display.format_header(&airdrop.project_name));
                    println!("{}", airdrop.description);
                    println!("Reward: {} | Deadline: {}", airdrop.estimated_reward, airdrop.deadline);
                    for task in &airdrop.tasks {
                        let mark = if task.completed { "x" } else { " " };
                        println!("  [{}] {}", mark, task.description);
                    }
                }
                Err(err) => println!("{}", err),
            },
            "signals" => {
                let signals = resolver.resolve_signals(&ContentFilter::default()).await;
                println!("{}", display.format_header("Early Signals"));
                for signal in &signals {
                    println!(
                        "  [{}/{}] {}",
                        signal.kind, signal.priority, signal.title
                    );
                }
            }
            other => println!("Unknown command: {}", other),
        }
    }

    info!("Shutting down");
    Ok(())
}
