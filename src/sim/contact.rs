//! Contact events and their classification

use super::category::Category;
use super::stage::EntityId;

/// One side of a reported contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactBody {
    pub entity: EntityId,
    pub category: Category,
}

impl ContactBody {
    pub fn new(entity: EntityId, category: Category) -> Self {
        Self { entity, category }
    }
}

/// A contact *begin* between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: ContactBody,
    pub b: ContactBody,
}

/// What a contact resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Score,
    Pickup,
    Fatal,
    Unrelated,
}

impl Contact {
    pub fn new(a: ContactBody, b: ContactBody) -> Self {
        Self { a, b }
    }

    /// Pair ordered by raw category value, lower first
    pub fn ordered(&self) -> (ContactBody, ContactBody) {
        if self.a.category.bit() < self.b.category.bit() {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    pub fn involves(&self, category: Category) -> bool {
        self.a.category == category || self.b.category == category
    }

    /// The body with the given category, if any
    pub fn body(&self, category: Category) -> Option<ContactBody> {
        let (first, second) = self.ordered();
        [first, second].into_iter().find(|b| b.category == category)
    }

    /// Classify by precedence: score trigger, pickup, then ground/obstacle
    pub fn kind(&self) -> ContactKind {
        if self.involves(Category::ScoreTrigger) {
            ContactKind::Score
        } else if self.involves(Category::Pickup) {
            ContactKind::Pickup
        } else if self.involves(Category::Ground) || self.involves(Category::Obstacle) {
            ContactKind::Fatal
        } else {
            ContactKind::Unrelated
        }
    }
}
