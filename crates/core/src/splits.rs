//! Migration of legacy flat-persisted split rows.
//!
//! Older quotations persisted allocation variants as flat sibling rows
//! flagged by a name prefix, relying on insertion order to recover which
//! parent each variant belongs to. The current data model carries splits
//! explicitly on `QuoteLineItem::splits`; this module exists solely to
//! regroup previously persisted flat records into that form.

use crate::domain::quote::{QuoteLineItem, SplitLineItem};

/// Name prefix that flags a flat-persisted row as a split of the nearest
/// preceding non-split row.
pub const SPLIT_MARKER: &str = "split:";

/// Regroups a flat, order-preserving record sequence using the default
/// marker prefix.
pub fn regroup_flat_records(records: Vec<QuoteLineItem>) -> Vec<QuoteLineItem> {
    regroup_with_marker(records, SPLIT_MARKER)
}

/// Regroups flat records: a row whose name starts with `marker` is
/// attached to the most recently seen non-split row. A leading split with
/// no preceding parent stays a top-level item — nothing is ever dropped.
pub fn regroup_with_marker(records: Vec<QuoteLineItem>, marker: &str) -> Vec<QuoteLineItem> {
    let mut grouped: Vec<QuoteLineItem> = Vec::with_capacity(records.len());

    for record in records {
        if record.name.starts_with(marker) {
            if let Some(parent) = grouped.last_mut() {
                parent.splits.push(into_split(record));
                continue;
            }
        }
        grouped.push(record);
    }

    grouped
}

fn into_split(record: QuoteLineItem) -> SplitLineItem {
    SplitLineItem {
        name: record.name,
        description: record.description,
        unit_price: record.unit_price,
        quantity: record.quantity,
        discount: record.discount,
        total: record.total,
    }
}
