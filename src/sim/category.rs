//! Contact categories and per-body category sets
//!
//! Every body carries one primary category plus two sets: what it physically
//! collides with and what it must report contacts with.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic category of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Actor,
    Ground,
    Obstacle,
    ScoreTrigger,
    Pickup,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Actor,
        Category::Ground,
        Category::Obstacle,
        Category::ScoreTrigger,
        Category::Pickup,
    ];

    /// Raw bit value; also the canonical ordering key for contact pairs
    #[inline]
    pub const fn bit(self) -> u32 {
        match self {
            Category::Actor => 1 << 0,
            Category::Ground => 1 << 1,
            Category::Obstacle => 1 << 2,
            Category::ScoreTrigger => 1 << 3,
            Category::Pickup => 1 << 4,
        }
    }
}

/// A set of categories
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CategorySet(u32);

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet(0);

    pub const fn of(categories: &[Category]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < categories.len() {
            bits |= categories[i].bit();
            i += 1;
        }
        CategorySet(bits)
    }

    #[inline]
    pub const fn contains(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn insert(&mut self, category: Category) {
        self.0 |= category.bit();
    }

    pub fn remove(&mut self, category: Category) {
        self.0 &= !category.bit();
    }

    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl From<Category> for CategorySet {
    fn from(category: Category) -> Self {
        CategorySet(category.bit())
    }
}

impl fmt::Debug for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Category configuration of a single body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub category: Category,
    /// Categories that block this body's motion
    pub collides_with: CategorySet,
    /// Categories whose overlap with this body must be reported
    pub reports_contact_with: CategorySet,
}

impl Body {
    /// Everything the actor can hit during a live run
    pub const ACTOR_COLLISIONS: CategorySet =
        CategorySet::of(&[Category::Ground, Category::Obstacle, Category::Pickup]);

    /// Collision set of an actor whose run has ended
    pub const DYING_ACTOR_COLLISIONS: CategorySet = CategorySet::of(&[Category::Ground]);

    pub const fn actor() -> Self {
        Self {
            category: Category::Actor,
            collides_with: Self::ACTOR_COLLISIONS,
            reports_contact_with: Self::ACTOR_COLLISIONS,
        }
    }

    pub const fn ground() -> Self {
        Self::inert(Category::Ground)
    }

    pub const fn obstacle() -> Self {
        Self::inert(Category::Obstacle)
    }

    pub const fn score_trigger() -> Self {
        Self {
            category: Category::ScoreTrigger,
            collides_with: CategorySet::EMPTY,
            reports_contact_with: CategorySet::of(&[Category::Actor]),
        }
    }

    pub const fn pickup() -> Self {
        Self::inert(Category::Pickup)
    }

    const fn inert(category: Category) -> Self {
        Self {
            category,
            collides_with: CategorySet::EMPTY,
            reports_contact_with: CategorySet::EMPTY,
        }
    }

    /// True if an overlap between the two bodies produces a contact event
    pub fn reports_with(&self, other: &Body) -> bool {
        self.reports_contact_with.contains(other.category)
            || other.reports_contact_with.contains(self.category)
    }

    /// True if `other` blocks this body
    pub fn is_blocked_by(&self, other: &Body) -> bool {
        self.collides_with.contains(other.category)
    }
}
