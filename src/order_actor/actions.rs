//! Custom actions for the Order actor.

use crate::model::OrderStatus;

/// Orders are never edited; the only change after creation is a status move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderAction {
    /// Moves the order to a new status if [`OrderStatus::can_transition_to`] allows it.
    /// Moving to `cancelled` returns the reserved stock.
    Transition(OrderStatus),
}
