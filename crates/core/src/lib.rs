pub mod config;
pub mod domain;
pub mod errors;
pub mod resolve;
pub mod splits;
pub mod totals;

pub use config::{AppConfig, ConfigError, LoadOptions, LogFormat};
pub use domain::catalog::{AliasRule, Catalog, CatalogItem, SnapshotError};
pub use domain::quote::{implied_discount, Quote, QuoteId, QuoteLineItem, SplitLineItem};
pub use errors::DomainError;
pub use resolve::{
    parse_block, parse_line, resolve_block, resolve_line, LineParse, ParsedLine, Resolution,
    ResolutionOutcome, ResolvedLine, UnresolvedLine,
};
pub use splits::{regroup_flat_records, regroup_with_marker, SPLIT_MARKER};
pub use totals::{aggregate, QuoteFinancials, VAT_RATE};
