//! Free-text quote-line resolution.
//!
//! Takes an operator-typed shorthand block, resolves each line against the
//! catalog snapshot (alias rules first, then direct name matching), and
//! reconciles the operator's typed total against nominal catalog pricing
//! into an implied discount. Resolution is a pure function of the line and
//! the snapshot: no I/O, no randomness, deterministic for identical inputs.

pub mod outcome;
pub mod parser;

use rust_decimal::Decimal;

pub use outcome::{ResolutionOutcome, ResolvedLine, UnresolvedLine};
pub use parser::{parse_block, parse_line, LineParse, ParsedLine};

use crate::domain::catalog::{Catalog, CatalogItem};
use crate::domain::quote::implied_discount;

/// Per-line resolution result. Unresolvable input is data, not an error.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Resolved(ResolvedLine),
    Unresolved(UnresolvedLine),
}

/// Resolves a whole shorthand block against the catalog snapshot,
/// classifying each non-blank line in order.
pub fn resolve_block(block: &str, catalog: &Catalog) -> ResolutionOutcome {
    let mut outcome = ResolutionOutcome::default();

    for parse in parser::parse_block(block) {
        match parse {
            LineParse::Passthrough(line) => outcome.unknown.push(UnresolvedLine {
                raw_text: line.clone(),
                line,
                quantity: 1,
                unit_price: None,
            }),
            LineParse::Shorthand(parsed) => match resolve_line(&parsed, catalog) {
                Resolution::Resolved(resolved) => outcome.items.push(resolved),
                Resolution::Unresolved(unresolved) => outcome.unknown.push(unresolved),
            },
        }
    }

    outcome
}

/// Resolves one syntactically parsed line: alias rules in consultation
/// order first, then a direct scan of catalog item names. The first
/// satisfying match wins; there is no best-match ranking.
pub fn resolve_line(parsed: &ParsedLine, catalog: &Catalog) -> Resolution {
    let matched = match_alias(&parsed.item_text, catalog)
        .or_else(|| match_item(&parsed.item_text, catalog).map(|item| (item, None)));

    let Some((item, price_override)) = matched else {
        return Resolution::Unresolved(unresolved(parsed));
    };

    // The operator's figure is authoritative; an alias override supersedes
    // it. With neither there is nothing to reconcile against.
    let Some(final_price) = price_override.or(parsed.typed_total) else {
        return Resolution::Unresolved(unresolved(parsed));
    };

    Resolution::Resolved(ResolvedLine {
        name: item.name.clone(),
        description: item.description.clone(),
        unit_price: item.unit_price,
        quantity: parsed.quantity,
        discount: implied_discount(item.unit_price, parsed.quantity, final_price),
        total: final_price,
        matched_text: parsed.item_text.clone(),
    })
}

fn unresolved(parsed: &ParsedLine) -> UnresolvedLine {
    UnresolvedLine {
        line: parsed.raw_text.clone(),
        quantity: parsed.quantity,
        raw_text: parsed.item_text.clone(),
        unit_price: parsed.typed_total,
    }
}

fn match_alias<'a>(
    item_text: &str,
    catalog: &'a Catalog,
) -> Option<(&'a CatalogItem, Option<Decimal>)> {
    let needle = item_text.to_lowercase();

    for rule in catalog.aliases() {
        if !alias_matches(&rule.alias_text, &needle) {
            continue;
        }
        match catalog.find_item(&rule.canonical_item_name) {
            Some(item) => return Some((item, rule.price_override)),
            // Dangling rule in an unvalidated snapshot: skip it and keep
            // scanning rather than fail the line.
            None => continue,
        }
    }

    None
}

fn alias_matches(alias_text: &str, item_text_lower: &str) -> bool {
    let alias = alias_text.to_lowercase();
    alias == item_text_lower
        || item_text_lower.contains(alias.as_str())
        || alias.contains(item_text_lower)
}

fn match_item<'a>(item_text: &str, catalog: &'a Catalog) -> Option<&'a CatalogItem> {
    let needle = item_text.to_lowercase();
    catalog.items().iter().find(|item| {
        let name = item.name.to_lowercase();
        name.contains(needle.as_str()) || needle.contains(name.as_str())
    })
}
