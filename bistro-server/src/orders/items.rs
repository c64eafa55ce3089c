//! Line item normalization for incoming orders
//!
//! Clients send items as loosely typed JSON (prices and quantities may be
//! strings). Each entry is coerced the way a JavaScript `Number()` call
//! would, entries that cannot be ordered are dropped, and the survivors are
//! checked against the line item invariants.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;
use shared::models::OrderItem;

use crate::utils::validation::MAX_NAME_LEN;
use crate::utils::{AppError, ErrorCode};

/// Upper bound for a single line quantity
const MAX_QUANTITY: f64 = 9999.0;

/// Numeric coercion for a loosely typed JSON value
///
/// Numbers as-is, strings trimmed and parsed (empty string is 0), booleans
/// 1/0, null 0; anything else is NaN.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .unwrap_or(f64::NAN)
            }
        }
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Null) => 0.0,
        _ => f64::NAN,
    }
}

/// Coerce and filter raw items
///
/// `Err` when `items` is not a non-empty array, or when a surviving entry
/// has a negative or unrepresentable price, or a fractional / oversized
/// quantity. An empty result is left to the caller.
pub fn normalize_items(items: Option<&Value>) -> Result<Vec<OrderItem>, AppError> {
    let raw = match items {
        Some(Value::Array(raw)) if !raw.is_empty() => raw,
        _ => return Err(AppError::validation("Items must be a non-empty array")),
    };

    let mut normalized = Vec::with_capacity(raw.len());
    for entry in raw {
        let name = match entry.get("name") {
            Some(Value::String(name)) if !name.trim().is_empty() => name.trim(),
            _ => continue,
        };
        let price = coerce_number(entry.get("price"));
        let quantity = coerce_number(entry.get("quantity"));
        if price.is_nan() || quantity.is_nan() || quantity <= 0.0 {
            continue;
        }

        if price < 0.0 {
            return Err(invalid_item(name, "price must be non-negative"));
        }
        if Decimal::from_f64(price).is_none() {
            return Err(invalid_item(name, "price is out of range"));
        }
        if quantity.fract() != 0.0 {
            return Err(invalid_item(name, "quantity must be a whole number"));
        }
        if quantity > MAX_QUANTITY {
            return Err(invalid_item(name, "quantity exceeds the maximum of 9999"));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(invalid_item(name, "name is too long"));
        }

        normalized.push(OrderItem {
            name: name.to_string(),
            price,
            quantity: quantity as u32,
        });
    }
    Ok(normalized)
}

fn invalid_item(name: &str, reason: &str) -> AppError {
    AppError::with_message(ErrorCode::InvalidOrderItem, format!("Invalid item '{name}': {reason}"))
        .with_detail("item", name)
}
