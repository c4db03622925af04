use std::fs;
use std::path::Path;

use anyhow::Context;
use rigline_core::config::AppConfig;
use rigline_core::{regroup_flat_records, Quote, QuoteFinancials};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct TotalsReport<'a> {
    command: &'static str,
    status: &'static str,
    currency: &'a str,
    quote_id: String,
    client: String,
    line_count: usize,
    financials: QuoteFinancials,
}

pub fn run(
    config: &AppConfig,
    quote_path: &Path,
    discount: Option<Decimal>,
    extra_discount: Option<Decimal>,
    regroup_splits: bool,
) -> CommandResult {
    match execute(quote_path, discount, extra_discount, regroup_splits) {
        Ok(quote) => CommandResult::report(&TotalsReport {
            command: "totals",
            status: "ok",
            currency: &config.quote.currency,
            quote_id: quote.id.0.clone(),
            client: quote.client.clone(),
            line_count: quote.lines.len(),
            financials: quote.financials(),
        }),
        Err(error) => CommandResult::failure("totals", "quote_input", format!("{error:#}"), 1),
    }
}

fn execute(
    quote_path: &Path,
    discount: Option<Decimal>,
    extra_discount: Option<Decimal>,
    regroup_splits: bool,
) -> anyhow::Result<Quote> {
    let raw = fs::read_to_string(quote_path)
        .with_context(|| format!("reading quote file `{}`", quote_path.display()))?;
    let mut quote: Quote = serde_json::from_str(&raw)
        .with_context(|| format!("parsing quote file `{}`", quote_path.display()))?;

    if regroup_splits {
        let flat_count = quote.lines.len();
        quote.lines = regroup_flat_records(std::mem::take(&mut quote.lines));
        debug!(flat_count, grouped_count = quote.lines.len(), "regrouped legacy flat records");
    }

    if let Some(percent) = discount {
        quote.set_discount_percent(percent).context("applying --discount")?;
    }
    if let Some(percent) = extra_discount {
        quote.set_extra_discount_percent(percent).context("applying --extra-discount")?;
    }

    Ok(quote)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rigline_core::config::AppConfig;
    use tempfile::TempDir;

    use super::run;

    const QUOTE_JSON: &str = r#"{
        "id": "Q-2026-0117",
        "client": "Hangar 11",
        "created_at": "2026-03-14T10:00:00Z",
        "lines": [
            {
                "name": "Main hall PA",
                "description": "",
                "unit_price": "1000",
                "quantity": 1,
                "discount": "0",
                "total": "1000"
            }
        ],
        "discount_percent": "10",
        "extra_discount_percent": "0"
    }"#;

    #[test]
    fn totals_reports_the_cascade() {
        let dir = TempDir::new().expect("temp dir");
        let quote_path = dir.path().join("quote.json");
        fs::write(&quote_path, QUOTE_JSON).expect("write quote");

        let result = run(&AppConfig::default(), &quote_path, None, Some("5".parse().unwrap()), false);
        assert_eq!(result.exit_code, 0);

        let report: serde_json::Value =
            serde_json::from_str(&result.output).expect("report should be valid JSON");
        assert_eq!(report["financials"]["subtotal"], "1000");
        assert_eq!(report["financials"]["vat_amount"], "162");
        assert_eq!(report["financials"]["final_total"], "1062");
        assert_eq!(report["financials"]["extra_discount_amount"], "53");
        assert_eq!(report["financials"]["final_payable"], "1009");
    }

    #[test]
    fn out_of_range_discount_flag_fails_cleanly() {
        let dir = TempDir::new().expect("temp dir");
        let quote_path = dir.path().join("quote.json");
        fs::write(&quote_path, QUOTE_JSON).expect("write quote");

        let result =
            run(&AppConfig::default(), &quote_path, Some("140".parse().unwrap()), None, false);
        assert_eq!(result.exit_code, 1);

        let report: serde_json::Value =
            serde_json::from_str(&result.output).expect("failure should be valid JSON");
        assert_eq!(report["error_class"], "quote_input");
    }
}
