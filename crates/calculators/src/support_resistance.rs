use crate::Calculator;
use crate::input::decimal_list;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

fn default_tolerance() -> Decimal {
    dec!(0.5)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStrength {
    Weak,
    Moderate,
    Strong,
}

impl ZoneStrength {
    fn from_touches(touches: usize) -> Self {
        match touches {
            0 | 1 => ZoneStrength::Weak,
            2 => ZoneStrength::Moderate,
            _ => ZoneStrength::Strong,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceZone {
    /// Mean of the clustered prices.
    pub price: Decimal,
    pub lower: Decimal,
    pub upper: Decimal,
    pub touches: usize,
    pub strength: ZoneStrength,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportResistanceInput {
    #[serde(default, alias = "recentHighs", deserialize_with = "decimal_list")]
    pub highs: Vec<Decimal>,
    #[serde(default, alias = "recentLows", deserialize_with = "decimal_list")]
    pub lows: Vec<Decimal>,
    /// Maximum distance from a zone's mean, in percent, for a price to join it.
    #[serde(default = "default_tolerance")]
    pub tolerance_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportResistanceResult {
    pub resistance_zones: Vec<PriceZone>,
    pub support_zones: Vec<PriceZone>,
}

struct Cluster {
    sum: Decimal,
    members: Vec<Decimal>,
}

impl Cluster {
    fn new(price: Decimal) -> Self {
        Self {
            sum: price,
            members: vec![price],
        }
    }

    fn mean(&self) -> Decimal {
        self.sum / Decimal::from(self.members.len())
    }

    fn into_zone(self) -> PriceZone {
        let price = self.mean();
        let touches = self.members.len();
        PriceZone {
            price,
            lower: self.members.first().copied().unwrap_or(price),
            upper: self.members.last().copied().unwrap_or(price),
            touches,
            strength: ZoneStrength::from_touches(touches),
        }
    }
}

/// Groups prices into zones. Prices are visited in ascending order and join the current
/// zone while they stay within `tolerance_percent` of its running mean. Zones come back
/// strongest first, ties broken by price. `None` when a zone's total overflows.
pub fn cluster_zones(prices: &[Decimal], tolerance_percent: Decimal) -> Option<Vec<PriceZone>> {
    let mut sorted = prices.to_vec();
    sorted.sort();

    let mut clusters: Vec<Cluster> = Vec::new();
    for price in sorted {
        match clusters.last_mut() {
            Some(cluster) if within(price, cluster.mean(), tolerance_percent) => {
                cluster.sum = cluster.sum.checked_add(price)?;
                cluster.members.push(price);
            }
            _ => clusters.push(Cluster::new(price)),
        }
    }

    let mut zones: Vec<PriceZone> = clusters.into_iter().map(Cluster::into_zone).collect();
    zones.sort_by(|a, b| b.touches.cmp(&a.touches).then(a.price.cmp(&b.price)));
    Some(zones)
}

fn within(price: Decimal, reference: Decimal, tolerance_percent: Decimal) -> bool {
    (price - reference)
        .abs()
        .checked_div(reference)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .is_some_and(|distance| distance <= tolerance_percent)
}

impl Calculator for SupportResistanceInput {
    type Output = SupportResistanceResult;

    fn calculate(&self) -> Option<SupportResistanceResult> {
        let no_prices = self.highs.is_empty() && self.lows.is_empty();
        let invalid = self
            .highs
            .iter()
            .chain(&self.lows)
            .any(|price| *price <= Decimal::ZERO);
        if no_prices || invalid || self.tolerance_percent < Decimal::ZERO {
            return None;
        }

        Some(SupportResistanceResult {
            resistance_zones: cluster_zones(&self.highs, self.tolerance_percent)?,
            support_zones: cluster_zones(&self.lows, self.tolerance_percent)?,
        })
    }
}
