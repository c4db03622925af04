use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::quote::QuoteLineItem;

/// An input line bound to a catalog item, with its reconciled price.
/// Ready to become a quote line item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLine {
    pub name: String,
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub discount: Decimal,
    pub total: Decimal,
    /// The item text that triggered the match, kept for traceability.
    pub matched_text: String,
}

/// An input line that could not be bound, surfaced for manual handling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedLine {
    /// The original input line, verbatim.
    pub line: String,
    pub quantity: u32,
    /// The text that failed resolution: the extracted item text when the
    /// grammar matched, the whole line when it did not.
    pub raw_text: String,
    /// The operator-typed total, kept as a manual-entry hint.
    pub unit_price: Option<Decimal>,
}

/// The classified result of resolving one text block: both sequences keep
/// the original line order, and unresolved lines are never dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    pub items: Vec<ResolvedLine>,
    pub unknown: Vec<UnresolvedLine>,
}

impl ResolutionOutcome {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.unknown.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len() + self.unknown.len()
    }
}

impl From<ResolvedLine> for QuoteLineItem {
    fn from(line: ResolvedLine) -> Self {
        QuoteLineItem::new(line.name, line.description, line.unit_price, line.quantity, line.total)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::quote::QuoteLineItem;

    use super::ResolvedLine;

    #[test]
    fn resolved_line_converts_into_a_line_item_with_derived_discount() {
        let resolved = ResolvedLine {
            name: "Followspot".to_string(),
            description: "Long-throw followspot with operator".to_string(),
            unit_price: Decimal::from(900),
            quantity: 2,
            discount: Decimal::from(300),
            total: Decimal::from(1500),
            matched_text: "followspot".to_string(),
        };

        let item = QuoteLineItem::from(resolved);
        assert_eq!(item.total, Decimal::from(1500));
        assert_eq!(item.discount, Decimal::from(300));
        assert!(item.splits.is_empty());
    }
}
