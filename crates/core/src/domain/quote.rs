use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::totals::{self, QuoteFinancials};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(pub String);

/// The implied discount of a line: the delta between nominal catalog
/// pricing and the authoritative total, clamped at zero. Always derived,
/// never an input.
pub fn implied_discount(unit_price: Decimal, quantity: u32, total: Decimal) -> Decimal {
    (unit_price * Decimal::from(quantity) - total).max(Decimal::ZERO)
}

/// An allocation variant of a top-level line item. Same numeric shape as
/// its parent, rendered nested under it, but an independent row: it never
/// feeds into the parent's own `total`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplitLineItem {
    pub name: String,
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub discount: Decimal,
    pub total: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteLineItem {
    pub name: String,
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub discount: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub splits: Vec<SplitLineItem>,
}

impl QuoteLineItem {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        total: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            unit_price,
            quantity,
            discount: implied_discount(unit_price, quantity, total),
            total,
            splits: Vec::new(),
        }
    }

    /// Nominal catalog price for this line (`unit_price × quantity`).
    pub fn nominal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    pub fn set_total(&mut self, total: Decimal) {
        self.total = total;
        self.recompute_discount();
    }

    pub fn set_unit_price(&mut self, unit_price: Decimal) {
        self.unit_price = unit_price;
        self.recompute_discount();
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::ZeroQuantity { name: self.name.clone() });
        }
        self.quantity = quantity;
        self.recompute_discount();
        Ok(())
    }

    fn recompute_discount(&mut self) {
        self.discount = implied_discount(self.unit_price, self.quantity, self.total);
    }
}

impl SplitLineItem {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        total: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            unit_price,
            quantity,
            discount: implied_discount(unit_price, quantity, total),
            total,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub client: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<QuoteLineItem>,
    pub discount_percent: Decimal,
    pub extra_discount_percent: Decimal,
}

impl Quote {
    pub fn new(id: QuoteId, client: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            client: client.into(),
            created_at,
            lines: Vec::new(),
            discount_percent: Decimal::ZERO,
            extra_discount_percent: Decimal::ZERO,
        }
    }

    pub fn set_discount_percent(&mut self, percent: Decimal) -> Result<(), DomainError> {
        validate_percent(percent)?;
        self.discount_percent = percent;
        Ok(())
    }

    pub fn set_extra_discount_percent(&mut self, percent: Decimal) -> Result<(), DomainError> {
        validate_percent(percent)?;
        self.extra_discount_percent = percent;
        Ok(())
    }

    pub fn financials(&self) -> QuoteFinancials {
        totals::aggregate(&self.lines, self.discount_percent, self.extra_discount_percent)
    }
}

fn validate_percent(percent: Decimal) -> Result<(), DomainError> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(DomainError::PercentOutOfRange(percent));
    }
    Ok(())
}
