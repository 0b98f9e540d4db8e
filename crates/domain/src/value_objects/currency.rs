//! Currency value object - three independent coin counters

use serde::{Deserialize, Serialize};

/// A character's purse.
///
/// Each denomination is its own counter; there is no automatic change-making
/// between them. Signed input is clamped to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    gold: u64,
    silver: u64,
    copper: u64,
}

impl Currency {
    pub fn new(gold: u64, silver: u64, copper: u64) -> Self {
        Self {
            gold,
            silver,
            copper,
        }
    }

    /// Build a purse from raw user input, clamping negatives to zero.
    pub fn from_input(gold: i64, silver: i64, copper: i64) -> Self {
        Self {
            gold: clamp_non_negative(gold),
            silver: clamp_non_negative(silver),
            copper: clamp_non_negative(copper),
        }
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn silver(&self) -> u64 {
        self.silver
    }

    pub fn copper(&self) -> u64 {
        self.copper
    }

    pub fn with_gold(mut self, amount: i64) -> Self {
        self.gold = clamp_non_negative(amount);
        self
    }

    pub fn with_silver(mut self, amount: i64) -> Self {
        self.silver = clamp_non_negative(amount);
        self
    }

    pub fn with_copper(mut self, amount: i64) -> Self {
        self.copper = clamp_non_negative(amount);
        self
    }
}

fn clamp_non_negative(amount: i64) -> u64 {
    u64::try_from(amount).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negatives_clamp_to_zero() {
        let purse = Currency::from_input(-5, 12, -1);
        assert_eq!(purse, Currency::new(0, 12, 0));
    }

    #[test]
    fn denominations_are_independent() {
        let purse = Currency::new(1, 2, 3).with_silver(-40).with_copper(250);
        assert_eq!(purse.gold(), 1);
        assert_eq!(purse.silver(), 0);
        assert_eq!(purse.copper(), 250);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Currency::new(1, 2, 3)).unwrap();
        assert_eq!(json["gold"], 1);
        assert_eq!(json["copper"], 3);
    }
}
