use core_types::Quote;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed-point rendering with exactly `decimals` digits after the point.
pub fn format_price(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}

/// A signed percentage such as `+0.40%` or `-1.25%`.
///
/// The sign follows the absolute change, so an unchanged price reads `+0.00%`.
pub fn format_change_percent(change: Decimal, change_percent: Decimal) -> String {
    let sign = if change >= Decimal::ZERO && change_percent >= Decimal::ZERO {
        "+"
    } else {
        ""
    };
    format!("{}{}%", sign, format_price(change_percent, 2))
}

/// `price (+x.xx%)` as used in price lists. The price keeps the provider's own precision.
pub fn price_with_change(quote: &Quote) -> String {
    format!(
        "{} ({})",
        quote.price.normalize(),
        format_change_percent(quote.change, quote.change_percent)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_price_pads_and_rounds() {
        assert_eq!(format_price(dec!(1.1), 5), "1.10000");
        assert_eq!(format_price(dec!(2350.456), 2), "2350.46");
        assert_eq!(format_price(dec!(2350.455), 2), "2350.46");
        assert_eq!(format_price(dec!(100), 2), "100.00");
    }

    #[test]
    fn test_format_change_percent_sign() {
        assert_eq!(format_change_percent(dec!(0.5), dec!(0.4)), "+0.40%");
        assert_eq!(format_change_percent(dec!(-3), dec!(-1.254)), "-1.25%");
        assert_eq!(format_change_percent(Decimal::ZERO, Decimal::ZERO), "+0.00%");
    }
}
