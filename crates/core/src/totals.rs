use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::quote::QuoteLineItem;

/// Fixed VAT rate (18%). Not configurable per quote.
pub const VAT_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// The derived financial cascade of one quotation. Never stored; always
/// recomputed from the line items and the two percentages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteFinancials {
    pub subtotal: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub total_after_discount: Decimal,
    pub vat_amount: Decimal,
    pub final_total: Decimal,
    pub extra_discount_percent: Decimal,
    pub extra_discount_amount: Decimal,
    pub final_payable: Decimal,
}

/// Computes the multi-stage total for a finalized sequence of line items:
/// subtotal, percentage discount, VAT, then a secondary discount applied
/// after VAT.
///
/// Each derived amount is rounded to the nearest whole currency unit at
/// the stage where it is computed, not once at the end. Historical
/// quotations were issued with these staged figures, so the cascade must
/// reproduce them exactly even where a single-pass computation would
/// differ.
pub fn aggregate(
    lines: &[QuoteLineItem],
    discount_percent: Decimal,
    extra_discount_percent: Decimal,
) -> QuoteFinancials {
    let subtotal: Decimal = lines.iter().map(row_total).sum();
    let discount_amount = round_currency(subtotal * discount_percent / Decimal::ONE_HUNDRED);
    let total_after_discount = subtotal - discount_amount;
    let vat_amount = round_currency(total_after_discount * VAT_RATE);
    let final_total = total_after_discount + vat_amount;
    let extra_discount_amount =
        round_currency(final_total * extra_discount_percent / Decimal::ONE_HUNDRED);
    let final_payable = final_total - extra_discount_amount;

    QuoteFinancials {
        subtotal,
        discount_percent,
        discount_amount,
        total_after_discount,
        vat_amount,
        final_total,
        extra_discount_percent,
        extra_discount_amount,
        final_payable,
    }
}

/// A line's contribution to the subtotal. Splits are independent rows
/// that happen to render nested, so each contributes its own total; the
/// parent's total is never adjusted for them.
fn row_total(line: &QuoteLineItem) -> Decimal {
    line.total + line.splits.iter().map(|split| split.total).sum::<Decimal>()
}

fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
