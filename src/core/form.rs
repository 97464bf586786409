//! Form input handling - Turns raw text fields into validated values.
//!
//! Covers the add/edit item form, the registration form, and the price display
//! format. Prices are entered and shown with `.` as the thousands separator
//! (`1.500` means fifteen hundred) and have no fractional part.

use crate::errors::{Error, Result};

fn missing_fields() -> Error {
    Error::InvalidInput {
        message: "All fields must be filled in".to_string(),
    }
}

/// A validated add/edit item form. It has no id: ids come from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemForm {
    /// Trimmed, non-empty item name
    pub name: String,
    /// Units on hand
    pub quantity: i64,
    /// Unit price
    pub price: f64,
}

impl ItemForm {
    /// Parses the three text fields of the item form.
    ///
    /// Whitespace around every field is ignored. Grouping dots in the price are
    /// dropped before parsing.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if a field is empty or a number does not
    /// parse. Range checks (negative values) are left to the item store.
    pub fn parse(name: &str, quantity: &str, price: &str) -> Result<Self> {
        let name = name.trim();
        let quantity = quantity.trim();
        let price = price.trim().replace('.', "");

        if name.is_empty() || quantity.is_empty() || price.is_empty() {
            return Err(missing_fields());
        }

        let quantity = quantity.parse::<i64>().map_err(|_| Error::InvalidInput {
            message: format!("Quantity '{quantity}' is not a whole number"),
        })?;
        let price = price.parse::<f64>().map_err(|_| Error::InvalidInput {
            message: format!("Price '{price}' is not a number"),
        })?;

        Ok(Self {
            name: name.to_string(),
            quantity,
            price,
        })
    }
}

/// Checks the registration form: all three fields filled and both passwords equal.
///
/// # Errors
/// Returns [`Error::InvalidInput`] describing the first problem found.
pub fn validate_registration(username: &str, password: &str, confirm: &str) -> Result<()> {
    if username.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(missing_fields());
    }

    if password != confirm {
        return Err(Error::InvalidInput {
            message: "Passwords do not match".to_string(),
        });
    }

    Ok(())
}

/// Formats a price with `.` thousands separators and no decimals, rounding
/// half to even (`1500.0` becomes `"1.500"`).
#[must_use]
pub fn format_price(price: f64) -> String {
    let rounded = price.round_ties_even();
    let sign = if rounded < 0.0 { "-" } else { "" };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let digits = (rounded.abs() as u64).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped}")
}
