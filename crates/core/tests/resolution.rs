//! End-to-end path: shorthand block -> resolution -> quote -> financials.

use chrono::Utc;
use rust_decimal::Decimal;

use rigline_core::{
    regroup_flat_records, resolve_block, AliasRule, Catalog, CatalogItem, Quote, QuoteId,
    QuoteLineItem,
};

fn catalog() -> Catalog {
    Catalog::validated(
        vec![
            CatalogItem {
                name: "LED wall 3x2".to_string(),
                description: "Modular LED wall, 3m by 2m".to_string(),
                unit_price: Decimal::from(4000),
            },
            CatalogItem {
                name: "Line array pair".to_string(),
                description: "Two-box line array hang".to_string(),
                unit_price: Decimal::from(1800),
            },
            CatalogItem {
                name: "Stage deck 2x1".to_string(),
                description: "Deck section with legs".to_string(),
                unit_price: Decimal::from(300),
            },
        ],
        vec![
            AliasRule {
                alias_text: "led".to_string(),
                canonical_item_name: "LED wall 3x2".to_string(),
                price_override: Some(Decimal::from(3600)),
                priority: 0,
            },
            AliasRule {
                alias_text: "pa".to_string(),
                canonical_item_name: "Line array pair".to_string(),
                price_override: None,
                priority: 1,
            },
        ],
    )
    .expect("fixture snapshot should validate")
}

#[test]
fn block_to_quote_to_financials() {
    let catalog = catalog();
    let block = "\
1 led 4200
2 pa 3000
8 stage deck 2000
confetti cannons for the finale
3 riggers";

    let outcome = resolve_block(block, &catalog);
    assert_eq!(outcome.items.len(), 3);
    assert_eq!(outcome.unknown.len(), 2);

    // Alias override beats the typed 4200.
    assert_eq!(outcome.items[0].total, Decimal::from(3600));
    assert_eq!(outcome.items[0].discount, Decimal::from(400));
    // Typed totals are authoritative where no override exists.
    assert_eq!(outcome.items[1].total, Decimal::from(3000));
    assert_eq!(outcome.items[1].discount, Decimal::from(600));
    assert_eq!(outcome.items[2].total, Decimal::from(2000));
    assert_eq!(outcome.items[2].discount, Decimal::from(400));

    // "confetti cannons..." fails the grammar; "3 riggers" parses but has
    // no catalog match. Both survive verbatim.
    assert_eq!(outcome.unknown[0].line, "confetti cannons for the finale");
    assert_eq!(outcome.unknown[0].quantity, 1);
    assert_eq!(outcome.unknown[1].raw_text, "riggers");
    assert_eq!(outcome.unknown[1].quantity, 3);

    let mut quote = Quote::new(QuoteId("Q-2026-0117".to_string()), "Hangar 11", Utc::now());
    quote.lines = outcome.items.into_iter().map(QuoteLineItem::from).collect();
    quote.set_discount_percent(Decimal::from(10)).expect("10 is a valid percent");

    let financials = quote.financials();
    assert_eq!(financials.subtotal, Decimal::from(8600));
    assert_eq!(financials.discount_amount, Decimal::from(860));
    assert_eq!(financials.total_after_discount, Decimal::from(7740));
    // round(7740 * 0.18) = round(1393.2)
    assert_eq!(financials.vat_amount, Decimal::from(1393));
    assert_eq!(financials.final_total, Decimal::from(9133));
    assert_eq!(financials.final_payable, Decimal::from(9133));
}

#[test]
fn migrated_flat_records_price_like_their_flat_originals() {
    let flat = vec![
        QuoteLineItem::new("Main hall PA", "", Decimal::from(4000), 1, Decimal::from(4000)),
        QuoteLineItem::new("split: hall B allocation", "", Decimal::from(1200), 1, Decimal::from(1200)),
        QuoteLineItem::new("Lighting rig", "", Decimal::from(2500), 1, Decimal::from(2500)),
    ];

    let flat_financials = rigline_core::aggregate(&flat, Decimal::ZERO, Decimal::ZERO);

    let grouped = regroup_flat_records(flat);
    assert_eq!(grouped.len(), 2);
    let grouped_financials = rigline_core::aggregate(&grouped, Decimal::ZERO, Decimal::ZERO);

    // Regrouping is presentational; the cascade must not move.
    assert_eq!(flat_financials, grouped_financials);
    assert_eq!(grouped_financials.subtotal, Decimal::from(7700));
}

#[test]
fn repeated_resolution_is_byte_identical() {
    let catalog = catalog();
    let block = "1 led 4200\nmystery fog\n2 pa 3000";

    let first = serde_json::to_string(&resolve_block(block, &catalog)).expect("serializes");
    let second = serde_json::to_string(&resolve_block(block, &catalog)).expect("serializes");
    assert_eq!(first, second);
}
