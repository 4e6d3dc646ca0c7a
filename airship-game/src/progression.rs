//! Location and airship progression tables.
//!
//! Progression is wealth-based and purely advisory: the tables never feed
//! back into decision gating, which runs off the ledger alone.
use crate::constants::{BTC_PRICE_USD, RES_ADVENTURE_POINTS, RES_BITCOIN, RES_CASH};
use crate::state::Ledger;

/// A nomad base the player can unlock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    /// Monthly cost of living in USD.
    pub monthly_cost: f64,
    /// Adventure points required before the location unlocks.
    pub unlock_req: f64,
}

pub const LOCATIONS: &[Location] = &[
    Location {
        id: "bangkok",
        name: "Bangkok, Thailand",
        monthly_cost: 800.0,
        unlock_req: 0.0,
    },
    Location {
        id: "mexico",
        name: "Mexico City, Mexico",
        monthly_cost: 900.0,
        unlock_req: 30.0,
    },
    Location {
        id: "portugal",
        name: "Lisbon, Portugal",
        monthly_cost: 1_200.0,
        unlock_req: 50.0,
    },
    Location {
        id: "iceland",
        name: "Reykjavik, Iceland",
        monthly_cost: 2_000.0,
        unlock_req: 100.0,
    },
];

/// An airship tier, unlocked by total wealth. Ordered cheapest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirshipTier {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub cost: f64,
    pub capacity: u8,
    pub income_mult: f64,
}

pub const AIRSHIPS: &[AirshipTier] = &[
    AirshipTier {
        id: "balloon",
        name: "Nomad Balloon",
        icon: "🎈",
        cost: 0.0,
        capacity: 1,
        income_mult: 1.0,
    },
    AirshipTier {
        id: "cruiser",
        name: "Freedom Cruiser",
        icon: "🚁",
        cost: 3_000.0,
        capacity: 2,
        income_mult: 1.5,
    },
    AirshipTier {
        id: "explorer",
        name: "Sky Empire",
        icon: "✈️",
        cost: 15_000.0,
        capacity: 5,
        income_mult: 2.5,
    },
];

/// Table lookup by location id.
#[must_use]
pub fn location(location_id: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|entry| entry.id == location_id)
}

/// Combined worth of cash and bitcoin holdings at the fixed valuation.
#[must_use]
pub fn total_wealth(ledger: &Ledger) -> f64 {
    ledger.amount(RES_CASH) + ledger.amount(RES_BITCOIN) * BTC_PRICE_USD
}

/// The best airship tier the given wealth can afford. The base balloon
/// costs nothing, so there is always an answer.
#[must_use]
pub fn best_airship(wealth: f64) -> &'static AirshipTier {
    AIRSHIPS
        .iter()
        .rev()
        .find(|tier| wealth >= tier.cost)
        .unwrap_or(&AIRSHIPS[0])
}

/// Locations whose adventure-point requirement the ledger currently meets.
#[must_use]
pub fn reachable_locations(ledger: &Ledger) -> Vec<&'static Location> {
    let points = ledger.amount(RES_ADVENTURE_POINTS);
    LOCATIONS
        .iter()
        .filter(|entry| points >= entry.unlock_req)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FLOAT_EPSILON;

    #[test]
    fn starting_wealth_prices_bitcoin_at_fixed_rate() {
        let ledger = Ledger::default();
        // 1200 cash + 0.15 BTC * 50k
        assert!((total_wealth(&ledger) - 8_700.0).abs() < FLOAT_EPSILON);
    }

    #[test]
    fn airship_tier_tracks_wealth() {
        assert_eq!(best_airship(0.0).id, "balloon");
        assert_eq!(best_airship(2_999.0).id, "balloon");
        assert_eq!(best_airship(3_000.0).id, "cruiser");
        assert_eq!(best_airship(40_000.0).id, "explorer");
    }

    #[test]
    fn starting_ledger_reaches_two_locations() {
        let ledger = Ledger::default(); // 45 adventure points
        let ids: Vec<_> = reachable_locations(&ledger)
            .iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(ids, vec!["bangkok", "mexico"]);
        assert!(location("iceland").is_some());
        assert!(location("atlantis").is_none());
    }
}
