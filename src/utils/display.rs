use crate::models::{FearGreedIndex, MarketStats, PriceQuote};
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_header(&self, text: &str) -> String {
        format!("\n=== {} ===", text.bright_white().bold())
    }

    pub fn format_table(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.add_row(Row::new(
            headers.iter().map(|h| Cell::new(h).style_spec("b")).collect(),
        ));
        for row in rows {
            table.add_row(Row::new(row.iter().map(|cell| Cell::new(cell)).collect()));
        }

        table.to_string()
    }

    pub fn format_colored_change(&self, change: f64) -> String {
        if change >= 0.0 {
            format!("+{:.2}%", change).green().to_string()
        } else {
            format!("{:.2}%", change).red().to_string()
        }
    }

    pub fn format_currency(&self, amount: f64) -> String {
        if amount >= 1_000_000_000_000.0 {
            format!("${:.2}T", amount / 1_000_000_000_000.0)
        } else if amount >= 1_000_000_000.0 {
            format!("${:.2}B", amount / 1_000_000_000.0)
        } else if amount >= 1_000_000.0 {
            format!("${:.2}M", amount / 1_000_000.0)
        } else if amount >= 1.0 {
            format!("${:.2}", amount)
        } else {
            format!("${:.6}", amount)
        }
    }

    pub fn format_price_table(&self, quotes: &[PriceQuote]) -> String {
        let headers = &["Symbol", "Name", "Price (USD)", "24h Change", "Market Cap", "24h Volume"];
        let rows: Vec<Vec<String>> = quotes
            .iter()
            .map(|q| {
                vec![
                    q.symbol.clone(),
                    q.name.clone(),
                    self.format_currency(q.current_price),
                    self.format_colored_change(q.price_change_24h),
                    self.format_currency(q.market_cap),
                    self.format_currency(q.volume_24h),
                ]
            })
            .collect();
        self.format_table(headers, &rows)
    }

    pub fn format_fear_greed(&self, index: &FearGreedIndex) -> String {
        let value = index.value.to_string();
        let colored_value = match index.value {
            0..=24 => value.red(),
            25..=49 => value.yellow(),
            _ => value.green(),
        };
        format!("{} ({})", colored_value, index.classification)
    }

    pub fn format_market_stats(&self, stats: &MarketStats) -> String {
        let mut output = Vec::new();
        output.push(self.format_header("Market Stats"));
        output.push(format!(
            "Total Market Cap: {}",
            self.format_currency(stats.total_market_cap)
        ));
        output.push(format!("BTC Dominance: {:.2}%", stats.btc_dominance));
        output.push(format!(
            "24h Volume: {}",
            self.format_currency(stats.total_volume_24h)
        ));
        output.push(format!("Tracked Coins: {}", stats.active_cryptos));

        output.join("\n")
    }
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new()
    }
}
