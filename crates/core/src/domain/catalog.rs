use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A canonical priced offering. Owned and mutated by catalog management
/// outside the engine; the resolver only ever reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit_price: Decimal,
}

/// An operator-defined shorthand phrase mapping to a catalog item by name.
///
/// `price_override`, when present, stands in for the operator-typed line
/// total on every line the rule matches. `priority` is the stored
/// consultation order (lower first); rules with equal priority keep their
/// snapshot order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AliasRule {
    pub alias_text: String,
    pub canonical_item_name: String,
    #[serde(default)]
    pub price_override: Option<Decimal>,
    #[serde(default)]
    pub priority: u32,
}

/// A materialized, read-only snapshot of items and alias rules.
///
/// The engine never fetches anything itself; callers build a `Catalog`
/// up front and pass it in whole.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    aliases: Vec<AliasRule>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("could not read catalog snapshot `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog snapshot: {0}")]
    Parse(#[from] Box<toml::de::Error>),
    #[error("duplicate catalog item name `{name}`")]
    DuplicateItemName { name: String },
    #[error("catalog item `{name}` has a negative unit price")]
    NegativeUnitPrice { name: String },
    #[error("alias rule {index} has empty alias text")]
    EmptyAlias { index: usize },
    #[error("alias `{alias_text}` refers to unknown catalog item `{canonical_item_name}`")]
    UnknownCanonicalItem { alias_text: String, canonical_item_name: String },
}

impl Catalog {
    /// Builds a snapshot without validation. Alias rules are reordered by
    /// `priority` (stable, so equal priorities keep their given order).
    pub fn new(items: Vec<CatalogItem>, mut aliases: Vec<AliasRule>) -> Self {
        aliases.sort_by_key(|rule| rule.priority);
        Self { items, aliases }
    }

    /// Builds a snapshot after checking referential integrity: unique item
    /// names, non-negative prices, non-empty alias text (an empty needle
    /// would shadow every later rule), and no dangling canonical names.
    pub fn validated(
        items: Vec<CatalogItem>,
        aliases: Vec<AliasRule>,
    ) -> Result<Self, SnapshotError> {
        for (index, item) in items.iter().enumerate() {
            if items[..index].iter().any(|earlier| earlier.name == item.name) {
                return Err(SnapshotError::DuplicateItemName { name: item.name.clone() });
            }
            if item.unit_price < Decimal::ZERO {
                return Err(SnapshotError::NegativeUnitPrice { name: item.name.clone() });
            }
        }

        for (index, rule) in aliases.iter().enumerate() {
            if rule.alias_text.trim().is_empty() {
                return Err(SnapshotError::EmptyAlias { index });
            }
            if !items.iter().any(|item| item.name == rule.canonical_item_name) {
                return Err(SnapshotError::UnknownCanonicalItem {
                    alias_text: rule.alias_text.clone(),
                    canonical_item_name: rule.canonical_item_name.clone(),
                });
            }
        }

        Ok(Self::new(items, aliases))
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| SnapshotError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, SnapshotError> {
        let file: SnapshotFile = toml::from_str(raw).map_err(Box::new)?;
        Self::validated(file.item, file.alias)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Alias rules in consultation order.
    pub fn aliases(&self) -> &[AliasRule] {
        &self.aliases
    }

    /// Exact-name item lookup, used to follow an alias rule's canonical name.
    pub fn find_item(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    item: Vec<CatalogItem>,
    #[serde(default)]
    alias: Vec<AliasRule>,
}
