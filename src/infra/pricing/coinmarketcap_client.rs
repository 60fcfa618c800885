//! CoinMarketCap client for the BTC/USD quote embedded in prompts.
//!
//! The quote is flavour for the generated text, so a failed lookup only
//! degrades the prompt to a placeholder line; it never blocks the run.

use reqwest::Client;
use std::error::Error;
use std::time::Duration;

const QUOTES_URL: &str = "https://pro-api.coinmarketcap.com/v1/cryptocurrency/quotes/latest";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct CoinMarketCapClient {
    client: Client,
    api_key: String,
}

impl CoinMarketCapClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Fetches the current BTC price in USD.
    pub async fn btc_usd_price(&self) -> Result<f64, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .get(QUOTES_URL)
            .timeout(REQUEST_TIMEOUT)
            .header("Accepts", "application/json")
            .header("X-CMC_PRO_API_KEY", &self.api_key)
            .query(&[("symbol", "BTC"), ("convert", "USD")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(format!("CoinMarketCap API error: {} - {}", status, text).into());
        }

        let response_json: serde_json::Value = response.json().await?;

        let price = response_json["data"]["BTC"]["quote"]["USD"]["price"]
            .as_f64()
            .ok_or("Failed to parse BTC quote")?;

        Ok(price)
    }
}

/// Renders the prompt line for a quote, or the placeholder when the lookup
/// failed.
pub fn format_btc_line(price: Option<f64>) -> String {
    match price {
        Some(price) => format!("1 BTC = ${}", format_usd(price)),
        None => "[BTC price unavailable]".to_string(),
    }
}

/// Formats a dollar amount with thousands separators and two decimals.
fn format_usd(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}.{}", group_thousands(int_part), frac_part)
}

fn group_thousands(digits: &str) -> String {
    let reversed: Vec<char> = digits.chars().rev().collect();
    let mut out = Vec::with_capacity(reversed.len() + reversed.len() / 3);
    for (i, ch) in reversed.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_usd(117432.1), "117,432.10");
        assert_eq!(format_usd(999.999), "1,000.00");
        assert_eq!(format_usd(1234567.894), "1,234,567.89");
        assert_eq!(format_usd(42.0), "42.00");
    }

    #[test]
    fn renders_quote_line_or_placeholder() {
        assert_eq!(format_btc_line(Some(65000.5)), "1 BTC = $65,000.50");
        assert_eq!(format_btc_line(None), "[BTC price unavailable]");
    }

    #[test]
    fn parses_quote_from_response_shape() {
        let raw = serde_json::json!({
            "data": { "BTC": { "quote": { "USD": { "price": 64321.87 } } } }
        });
        let price = raw["data"]["BTC"]["quote"]["USD"]["price"].as_f64();
        assert_eq!(price, Some(64321.87));
    }
}
