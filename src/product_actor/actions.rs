//! Custom actions for the Product actor.
//!
//! Stock only changes through these actions, each applied within a single actor turn:
//! a reservation checks and decrements in one step, so two concurrent orders can never
//! both take the last units.

/// Custom actions for Product entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Takes `quantity` units out of stock, or fails with
    /// [`ProductError::InsufficientStock`](super::ProductError::InsufficientStock)
    /// leaving stock untouched.
    Reserve(f64),
    /// Puts `quantity` units back, e.g. when an order is cancelled or a later line of the
    /// same order could not be reserved.
    Release(f64),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductActionResult {
    CheckStock(f64),
    Reserve(Reservation),
    /// Stock after the release.
    Release(f64),
}

/// A successful reservation: the unit price at that moment and the stock left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reservation {
    pub unit_price: f64,
    pub remaining: f64,
}
