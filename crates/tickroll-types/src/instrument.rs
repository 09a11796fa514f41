//! Simulated instrument and group definitions.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A simulated instrument.
///
/// The origin price is fixed at creation. The current price is stored as the
/// bit pattern of an `f64` in an atomic cell, so concurrent readers never
/// block the single tick writer.
#[derive(Debug)]
pub struct Instrument {
    /// Unique identifier (e.g., "NOVO", "BRK.B").
    id: String,
    /// Price at bootstrap.
    origin_price: f64,
    /// Current price, as `f64::to_bits`.
    current_price: AtomicU64,
}

impl Instrument {
    /// Creates a new instrument whose current price starts at the origin price.
    #[must_use]
    pub fn new(id: impl Into<String>, origin_price: f64) -> Self {
        Self {
            id: id.into(),
            origin_price,
            current_price: AtomicU64::new(origin_price.to_bits()),
        }
    }

    /// Returns the instrument identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the price the instrument was created with.
    #[must_use]
    pub const fn origin_price(&self) -> f64 {
        self.origin_price
    }

    /// Returns the current price.
    #[must_use]
    pub fn current_price(&self) -> f64 {
        f64::from_bits(self.current_price.load(Ordering::Acquire))
    }

    /// Overwrites the current price.
    pub fn set_current_price(&self, price: f64) {
        self.current_price.store(price.to_bits(), Ordering::Release);
    }

    /// Adds `delta` to the current price and returns the new price.
    ///
    /// No floor is applied: the price may become zero or negative.
    pub fn apply_delta(&self, delta: f64) -> f64 {
        let next = self.current_price() + delta;
        self.set_current_price(next);
        next
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.4})", self.id, self.current_price())
    }
}

/// Seed entry for one instrument inside a [`Group`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    /// Instrument identifier.
    pub id: String,
    /// Origin price.
    pub price: f64,
}

/// A named, ordered list of instruments used for classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Group name (e.g., "C25", "S&P500").
    pub name: String,
    /// Members in seed order.
    pub members: Vec<GroupMember>,
}

impl Group {
    /// Creates a group from `(id, origin price)` pairs.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members
                .into_iter()
                .map(|(id, price)| GroupMember {
                    id: id.into(),
                    price,
                })
                .collect(),
        }
    }

    /// Returns the member ids in seed order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.id.as_str())
    }

    /// Returns true if the group contains the given id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m.id == id)
    }
}
