use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Syntactic result of parsing one shorthand line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParsedLine {
    pub quantity: u32,
    pub item_text: String,
    pub typed_total: Option<Decimal>,
    pub raw_text: String,
}

/// One input line, either parsed against the shorthand grammar or passed
/// through verbatim when it does not fit. Passthrough is a normal outcome,
/// never an error.
#[derive(Clone, Debug, PartialEq)]
pub enum LineParse {
    Shorthand(ParsedLine),
    Passthrough(String),
}

/// Splits a free-text block into per-line parse results, one per
/// non-blank line, order preserved.
pub fn parse_block(block: &str) -> Vec<LineParse> {
    block.lines().map(str::trim).filter(|line| !line.is_empty()).map(parse_line).collect()
}

/// Parses one line against the shorthand grammar:
/// `<quantity:int> <item text> [<total:int>]` with an optional trailing
/// `|` terminator. The first integer token is the quantity and the last
/// integer-looking token before the terminator is the total; everything
/// between is the item text.
pub fn parse_line(raw: &str) -> LineParse {
    let trimmed = raw.trim();
    let body = trimmed.strip_suffix('|').map(str::trim_end).unwrap_or(trimmed);

    let mut tokens = body.split_whitespace();
    let quantity = match tokens.next().and_then(parse_quantity) {
        Some(quantity) => quantity,
        None => return LineParse::Passthrough(trimmed.to_string()),
    };

    let mut rest: Vec<&str> = tokens.collect();
    let typed_total = rest.last().and_then(|token| parse_amount(token));
    if typed_total.is_some() {
        rest.pop();
    }

    if rest.is_empty() {
        // A quantity with nothing to describe (or a bare pair of numbers)
        // does not fit the grammar.
        return LineParse::Passthrough(trimmed.to_string());
    }

    LineParse::Shorthand(ParsedLine {
        quantity,
        item_text: rest.join(" "),
        typed_total,
        raw_text: trimmed.to_string(),
    })
}

fn parse_quantity(token: &str) -> Option<u32> {
    token.parse::<u32>().ok().filter(|quantity| *quantity > 0)
}

fn parse_amount(token: &str) -> Option<Decimal> {
    token.parse::<u64>().ok().map(Decimal::from)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{parse_block, parse_line, LineParse};

    fn shorthand(raw: &str) -> super::ParsedLine {
        match parse_line(raw) {
            LineParse::Shorthand(parsed) => parsed,
            LineParse::Passthrough(line) => panic!("expected shorthand parse, got passthrough of {line:?}"),
        }
    }

    #[test]
    fn parses_quantity_text_and_total() {
        let parsed = shorthand("2 moving head 1200");
        assert_eq!(parsed.quantity, 2);
        assert_eq!(parsed.item_text, "moving head");
        assert_eq!(parsed.typed_total, Some(Decimal::from(1200)));
        assert_eq!(parsed.raw_text, "2 moving head 1200");
    }

    #[test]
    fn trailing_pipe_is_accepted_attached_or_detached() {
        let attached = shorthand("2 חלון סוויט 5000|");
        assert_eq!(attached.item_text, "חלון סוויט");
        assert_eq!(attached.typed_total, Some(Decimal::from(5000)));

        let detached = shorthand("2 חלון סוויט 5000 |");
        assert_eq!(detached.item_text, "חלון סוויט");
        assert_eq!(detached.typed_total, Some(Decimal::from(5000)));
    }

    #[test]
    fn total_is_optional() {
        let parsed = shorthand("3 stage deck");
        assert_eq!(parsed.quantity, 3);
        assert_eq!(parsed.item_text, "stage deck");
        assert_eq!(parsed.typed_total, None);
    }

    #[test]
    fn last_integer_token_binds_as_the_total() {
        let parsed = shorthand("2 led 500 300");
        assert_eq!(parsed.item_text, "led 500");
        assert_eq!(parsed.typed_total, Some(Decimal::from(300)));
    }

    #[test]
    fn line_without_leading_quantity_passes_through() {
        assert_eq!(
            parse_line("moving head 1200"),
            LineParse::Passthrough("moving head 1200".to_string())
        );
    }

    #[test]
    fn zero_quantity_fails_the_grammar() {
        assert_eq!(parse_line("0 truss 100"), LineParse::Passthrough("0 truss 100".to_string()));
    }

    #[test]
    fn bare_number_pair_passes_through() {
        assert_eq!(parse_line("2 4000"), LineParse::Passthrough("2 4000".to_string()));
    }

    #[test]
    fn block_skips_blank_lines_and_preserves_order() {
        let parses = parse_block("2 truss 400\n\n   \nnot shorthand\n1 riser");
        assert_eq!(parses.len(), 3);
        assert!(matches!(parses[0], LineParse::Shorthand(_)));
        assert!(matches!(parses[1], LineParse::Passthrough(_)));
        assert!(matches!(parses[2], LineParse::Shorthand(_)));
    }
}
