use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use rigline_core::config::AppConfig;
use rigline_core::{resolve_block, Catalog, ResolutionOutcome, ResolvedLine, UnresolvedLine};
use serde::Serialize;
use tracing::debug;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct ResolveReport<'a> {
    command: &'static str,
    status: &'static str,
    currency: &'a str,
    resolved_count: usize,
    unknown_count: usize,
    items: Vec<ResolvedLine>,
    unknown: Vec<UnresolvedLine>,
}

pub fn run(
    config: &AppConfig,
    input: Option<&Path>,
    catalog_override: Option<&Path>,
) -> CommandResult {
    match execute(config, input, catalog_override) {
        Ok(outcome) => CommandResult::report(&ResolveReport {
            command: "resolve",
            status: "ok",
            currency: &config.quote.currency,
            resolved_count: outcome.items.len(),
            unknown_count: outcome.unknown.len(),
            items: outcome.items,
            unknown: outcome.unknown,
        }),
        Err(error) => CommandResult::failure("resolve", "resolution_input", format!("{error:#}"), 1),
    }
}

fn execute(
    config: &AppConfig,
    input: Option<&Path>,
    catalog_override: Option<&Path>,
) -> anyhow::Result<ResolutionOutcome> {
    let catalog_path = catalog_override.unwrap_or(&config.catalog.path);
    let catalog = Catalog::load(catalog_path)
        .with_context(|| format!("loading catalog snapshot `{}`", catalog_path.display()))?;

    let block = read_block(input)?;
    debug!(
        items = catalog.items().len(),
        aliases = catalog.aliases().len(),
        lines = block.lines().count(),
        "resolving shorthand block"
    );

    Ok(resolve_block(&block, &catalog))
}

fn read_block(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading shorthand block `{}`", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading shorthand block from stdin")?;
            Ok(buffer)
        }
    }
}
