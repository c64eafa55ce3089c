//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;
use shared::models::OrderItem;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal, `None` outside the representable range
#[inline]
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Unit price × quantity (unrounded), `None` on overflow
pub fn line_total(item: &OrderItem) -> Option<Decimal> {
    to_decimal(item.price)?.checked_mul(Decimal::from(item.quantity))
}

/// Σ price × quantity, rounded to 2 decimal places
///
/// `None` when a price is not representable or the sum overflows.
pub fn compute_total(items: &[OrderItem]) -> Option<f64> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(line_total(item)?))
        .map(to_f64)
}

/// Keep a stored total unless it is absent or off by more than 0.01
pub fn reconcile_total(stored: Option<f64>, items: &[OrderItem]) -> f64 {
    let stored = stored.filter(|t| t.is_finite());
    match (stored, compute_total(items)) {
        (Some(total), Some(derived)) if money_eq(total, derived) => total,
        (_, Some(derived)) => derived,
        (Some(total), None) => total,
        (None, None) => 0.0,
    }
}

/// Compare two monetary values within [`MONEY_TOLERANCE`]
#[inline]
pub fn money_eq(a: f64, b: f64) -> bool {
    match (to_decimal(a), to_decimal(b)) {
        (Some(a), Some(b)) => a
            .checked_sub(b)
            .is_some_and(|diff| diff.abs() <= MONEY_TOLERANCE),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, quantity: u32) -> OrderItem {
        OrderItem {
            name: "x".into(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_compute_total() {
        assert_eq!(compute_total(&[item(12.0, 2), item(3.0, 1)]), Some(27.0));
        assert_eq!(compute_total(&[]), Some(0.0));
    }

    #[test]
    fn test_compute_total_avoids_float_drift() {
        // 0.1 + 0.2 in f64 is 0.30000000000000004
        assert_eq!(compute_total(&[item(0.1, 1), item(0.2, 1)]), Some(0.3));
        assert_eq!(compute_total(&[item(19.99, 3)]), Some(59.97));
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(compute_total(&[item(0.125, 1)]), Some(0.13));
        assert_eq!(compute_total(&[item(1.005, 1)]), Some(1.01));
    }

    #[test]
    fn test_out_of_range_amounts() {
        // Line overflows the Decimal range
        assert_eq!(line_total(&item(5e28, 2)), None);
        assert_eq!(compute_total(&[item(5e28, 2)]), None);
        // Each line fits, the sum does not
        assert_eq!(compute_total(&[item(5e28, 1), item(5e28, 1)]), None);
        // Not representable at all
        assert_eq!(to_decimal(1e30), None);
        assert_eq!(compute_total(&[item(1e30, 1)]), None);
        assert!(!money_eq(1e30, 0.0));
    }

    #[test]
    fn test_reconcile_total() {
        let items = [item(12.0, 2), item(3.0, 1)];
        assert_eq!(reconcile_total(None, &items), 27.0);
        assert_eq!(reconcile_total(Some(27.01), &items), 27.01);
        assert_eq!(reconcile_total(Some(26.99), &items), 26.99);
        assert_eq!(reconcile_total(Some(27.5), &items), 27.0);
        assert_eq!(reconcile_total(Some(f64::NAN), &items), 27.0);
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(10.0, 10.005));
        assert!(money_eq(10.0, 10.01));
        assert!(!money_eq(10.0, 10.02));
    }
}
