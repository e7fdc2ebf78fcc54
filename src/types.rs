//! Quote data model

use serde::{Deserialize, Serialize};

/// Unit of measure attached to a line item quantity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    Unit,
    SquareMeter,
    CubicMeter,
    Kilogram,
    Liter,
}

impl UnitOfMeasure {
    pub const ALL: [UnitOfMeasure; 5] = [
        UnitOfMeasure::Unit,
        UnitOfMeasure::SquareMeter,
        UnitOfMeasure::CubicMeter,
        UnitOfMeasure::Kilogram,
        UnitOfMeasure::Liter,
    ];

    /// Short label shown in the selector, the table and the PDF
    pub fn label(self) -> &'static str {
        match self {
            UnitOfMeasure::Unit => "unit",
            UnitOfMeasure::SquareMeter => "m²",
            UnitOfMeasure::CubicMeter => "m³",
            UnitOfMeasure::Kilogram => "kg",
            UnitOfMeasure::Liter => "L",
        }
    }
}

impl Default for UnitOfMeasure {
    fn default() -> Self {
        UnitOfMeasure::SquareMeter
    }
}

/// Line item quantity. `Flat` is the "-" sentinel: the unit value is
/// itself the line's total and no multiplication happens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Quantity {
    Flat,
    Of(f64),
}

/// One row of a quote
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub quantity: Quantity,
    pub measure: UnitOfMeasure,
    pub unit_value: f64,
}

impl LineItem {
    /// Row total, recomputed from quantity and unit value on every call.
    /// Totals are never stored, so edits can't leave a stale snapshot.
    pub fn total(&self) -> f64 {
        match self.quantity {
            Quantity::Flat => self.unit_value,
            Quantity::Of(n) => n * self.unit_value,
        }
    }
}

/// Sum of all row totals
pub fn grand_total(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: Quantity, unit_value: f64) -> LineItem {
        LineItem {
            name: "test".to_string(),
            quantity,
            measure: UnitOfMeasure::SquareMeter,
            unit_value,
        }
    }

    #[test]
    fn total_multiplies_quantity_by_unit_value() {
        assert_eq!(item(Quantity::Of(3.0), 12.5).total(), 37.5);
        assert_eq!(item(Quantity::Of(0.5), 100.0).total(), 50.0);
    }

    #[test]
    fn flat_quantity_uses_unit_value_as_total() {
        assert_eq!(item(Quantity::Flat, 499.9).total(), 499.9);
    }

    #[test]
    fn grand_total_is_sum_of_row_totals() {
        let items = vec![
            item(Quantity::Of(2.0), 10.0),
            item(Quantity::Flat, 30.0),
            item(Quantity::Of(1.5), 4.0),
        ];
        assert_eq!(grand_total(&items), 20.0 + 30.0 + 6.0);
    }

    #[test]
    fn grand_total_of_empty_list_is_zero() {
        assert_eq!(grand_total(&[]), 0.0);
    }
}
