use std::path::Path;

use anyhow::Context;
use rigline_core::config::AppConfig;
use rigline_core::Catalog;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct CatalogReport {
    command: &'static str,
    status: &'static str,
    path: String,
    item_count: usize,
    alias_count: usize,
    items: Vec<ItemRow>,
    aliases: Vec<AliasRow>,
}

#[derive(Debug, Serialize)]
struct ItemRow {
    name: String,
    unit_price: Decimal,
    alias_count: usize,
}

#[derive(Debug, Serialize)]
struct AliasRow {
    alias_text: String,
    canonical_item_name: String,
    price_override: Option<Decimal>,
    priority: u32,
}

pub fn run(config: &AppConfig, catalog_override: Option<&Path>) -> CommandResult {
    let catalog_path = catalog_override.unwrap_or(&config.catalog.path);

    let catalog = match Catalog::load(catalog_path)
        .with_context(|| format!("loading catalog snapshot `{}`", catalog_path.display()))
    {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure("catalog", "snapshot", format!("{error:#}"), 1)
        }
    };

    let items = catalog
        .items()
        .iter()
        .map(|item| ItemRow {
            name: item.name.clone(),
            unit_price: item.unit_price,
            alias_count: catalog
                .aliases()
                .iter()
                .filter(|rule| rule.canonical_item_name == item.name)
                .count(),
        })
        .collect();

    let aliases = catalog
        .aliases()
        .iter()
        .map(|rule| AliasRow {
            alias_text: rule.alias_text.clone(),
            canonical_item_name: rule.canonical_item_name.clone(),
            price_override: rule.price_override,
            priority: rule.priority,
        })
        .collect();

    CommandResult::report(&CatalogReport {
        command: "catalog",
        status: "ok",
        path: catalog_path.display().to_string(),
        item_count: catalog.items().len(),
        alias_count: catalog.aliases().len(),
        items,
        aliases,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rigline_core::config::AppConfig;
    use tempfile::TempDir;

    use super::run;

    #[test]
    fn catalog_inspection_lists_items_with_alias_counts() {
        let dir = TempDir::new().expect("temp dir");
        let catalog_path = dir.path().join("catalog.toml");
        fs::write(
            &catalog_path,
            r#"
[[item]]
name = "LED wall 3x2"
unit_price = "4000"

[[item]]
name = "Stage deck 2x1"
unit_price = "300"

[[alias]]
alias_text = "led"
canonical_item_name = "LED wall 3x2"

[[alias]]
alias_text = "wall"
canonical_item_name = "LED wall 3x2"
priority = 2
"#,
        )
        .expect("write catalog");

        let result = run(&AppConfig::default(), Some(&catalog_path));
        assert_eq!(result.exit_code, 0);

        let report: serde_json::Value =
            serde_json::from_str(&result.output).expect("report should be valid JSON");
        assert_eq!(report["item_count"], 2);
        assert_eq!(report["alias_count"], 2);
        assert_eq!(report["items"][0]["alias_count"], 2);
        assert_eq!(report["items"][1]["alias_count"], 0);
    }

    #[test]
    fn broken_snapshot_reports_the_offending_alias() {
        let dir = TempDir::new().expect("temp dir");
        let catalog_path = dir.path().join("catalog.toml");
        fs::write(
            &catalog_path,
            r#"
[[item]]
name = "LED wall 3x2"
unit_price = "4000"

[[alias]]
alias_text = "led"
canonical_item_name = "Removed item"
"#,
        )
        .expect("write catalog");

        let result = run(&AppConfig::default(), Some(&catalog_path));
        assert_eq!(result.exit_code, 1);

        let report: serde_json::Value =
            serde_json::from_str(&result.output).expect("failure should be valid JSON");
        assert_eq!(report["error_class"], "snapshot");
        let message = report["message"].as_str().expect("message should be a string");
        assert!(message.contains("Removed item"));
    }
}
