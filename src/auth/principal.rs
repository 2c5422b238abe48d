//! The authenticated caller, split by role.

use crate::model::{Role, UserId};

/// An authenticated shopkeeper. Only this type unlocks shop and product mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shopkeeper {
    pub id: UserId,
}

/// An authenticated customer. Only this type may place orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer {
    pub id: UserId,
}

/// Whoever a verified token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Shopkeeper(Shopkeeper),
    Customer(Customer),
}

impl Principal {
    pub fn new(id: UserId, role: Role) -> Self {
        match role {
            Role::Shopkeeper => Principal::Shopkeeper(Shopkeeper { id }),
            Role::Customer => Principal::Customer(Customer { id }),
        }
    }

    pub fn id(&self) -> UserId {
        match self {
            Principal::Shopkeeper(s) => s.id,
            Principal::Customer(c) => c.id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Principal::Shopkeeper(_) => Role::Shopkeeper,
            Principal::Customer(_) => Role::Customer,
        }
    }
}
