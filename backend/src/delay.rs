//! Delay-risk scoring for a single shipment.
//!
//! This is a synthetic scorer, not a trained model: the probability is a
//! weighted sum of normalized distance, normalized weight and a weekend flag,
//! plus bounded noise. The noise generator is keyed by the scorer seed and the
//! shipment itself, so the same shipment always gets the same score.

use rand::Rng;

use crate::error::InvalidInputError;
use crate::models::{DelayAssessment, RiskTier, ShipmentFeatures};
use crate::random::{keyed_rng, stable_hash};

const DISTANCE_SCALE_KM: f64 = 2_000.0;
const WEIGHT_SCALE_G: f64 = 20_000.0;
const DISTANCE_WEIGHT: f64 = 0.4;
const PARCEL_WEIGHT: f64 = 0.2;
const WEEKEND_WEIGHT: f64 = 0.2;
const MAX_NOISE: f64 = 0.3;

pub const MEDIUM_RISK_THRESHOLD: f64 = 0.35;
pub const HIGH_RISK_THRESHOLD: f64 = 0.6;

/// Fri, Sat, Sun with Monday = 0.
const LATE_WEEK_DAYS: [u8; 3] = [4, 5, 6];

#[derive(Debug, Clone, Copy)]
pub struct DelayScorer {
    seed: u64,
}

impl DelayScorer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn score(&self, features: &ShipmentFeatures) -> Result<DelayAssessment, InvalidInputError> {
        validate(features)?;

        let mut rng = keyed_rng(self.seed, feature_key(features));
        let distance = (features.distance_km / DISTANCE_SCALE_KM).min(1.0);
        let weight = (features.weight_g / WEIGHT_SCALE_G).min(1.0);
        let weekend = if LATE_WEEK_DAYS.contains(&features.order_dow) { 1.0 } else { 0.0 };
        let noise = rng.gen_range(0.0..MAX_NOISE);

        let probability = (DISTANCE_WEIGHT * distance
            + PARCEL_WEIGHT * weight
            + WEEKEND_WEIGHT * weekend
            + noise)
            .clamp(0.0, 1.0);
        let tier = classify(probability);

        tracing::debug!(
            "delay score {:.3} ({:?}) for {} -> {}",
            probability,
            tier,
            features.seller_city,
            features.customer_city
        );

        Ok(DelayAssessment {
            probability,
            tier,
            recommendations: recommendations(tier).iter().map(|s| s.to_string()).collect(),
        })
    }
}

pub fn classify(probability: f64) -> RiskTier {
    if probability > HIGH_RISK_THRESHOLD {
        RiskTier::High
    } else if probability > MEDIUM_RISK_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

pub fn recommendations(tier: RiskTier) -> &'static [&'static str] {
    match tier {
        RiskTier::High => &[
            "Alert customer immediately about possible delay",
            "Switch to express courier for this shipment",
            "Reroute via a closer hub city",
            "Enable real-time SMS tracking for customer",
        ],
        RiskTier::Medium => &[
            "Monitor this shipment closely",
            "Send estimated delivery confirmation to customer",
            "Consider dispatching 1 day earlier",
        ],
        RiskTier::Low => &[
            "Shipment looks good, no action needed",
            "Standard tracking is sufficient",
            "Expected to arrive within delivery window",
        ],
    }
}

fn validate(features: &ShipmentFeatures) -> Result<(), InvalidInputError> {
    let non_negative = |field: &'static str, value: f64| {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(InvalidInputError::InvalidFeature {
                field,
                reason: format!("expected a non-negative number, got {value}"),
            })
        }
    };

    non_negative("distance_km", features.distance_km)?;
    non_negative("weight_g", features.weight_g)?;
    non_negative("freight_value", features.freight_value)?;

    if features.order_dow > 6 {
        return Err(InvalidInputError::InvalidFeature {
            field: "order_dow",
            reason: format!("expected 0 (Monday) to 6 (Sunday), got {}", features.order_dow),
        });
    }
    if !(1..=12).contains(&features.order_month) {
        return Err(InvalidInputError::InvalidFeature {
            field: "order_month",
            reason: format!("expected 1 to 12, got {}", features.order_month),
        });
    }
    if features.item_count == 0 {
        return Err(InvalidInputError::InvalidFeature {
            field: "item_count",
            reason: "at least one item is required".to_string(),
        });
    }
    Ok(())
}

fn feature_key(features: &ShipmentFeatures) -> u64 {
    stable_hash([
        &features.distance_km.to_bits().to_le_bytes()[..],
        &features.weight_g.to_bits().to_le_bytes()[..],
        &[features.order_dow, features.order_month][..],
        &features.freight_value.to_bits().to_le_bytes()[..],
        &features.item_count.to_le_bytes()[..],
        features.seller_city.as_bytes(),
        &b"\0"[..],
        features.customer_city.as_bytes(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment() -> ShipmentFeatures {
        ShipmentFeatures {
            distance_km: 800.0,
            weight_g: 2_500.0,
            order_dow: 0,
            order_month: 1,
            freight_value: 150.0,
            item_count: 3,
            seller_city: "Chennai".into(),
            customer_city: "Bangalore".into(),
        }
    }

    #[test]
    fn test_same_shipment_same_score() {
        let scorer = DelayScorer::new(42);
        let a = scorer.score(&shipment()).unwrap();
        let b = scorer.score(&shipment()).unwrap();
        assert_eq!(a.probability, b.probability);
        assert_eq!(a.tier, b.tier);
    }

    #[test]
    fn test_long_heavy_weekend_shipment_is_high_risk() {
        let features = ShipmentFeatures {
            distance_km: 2_400.0,
            weight_g: 30_000.0,
            order_dow: 5,
            ..shipment()
        };
        let assessment = DelayScorer::new(1).score(&features).unwrap();
        assert!(assessment.probability >= 0.8);
        assert_eq!(assessment.tier, RiskTier::High);
        assert_eq!(assessment.recommendations.len(), 4);
    }

    #[test]
    fn test_short_light_weekday_shipment_is_low_risk() {
        let features = ShipmentFeatures {
            distance_km: 0.0,
            weight_g: 0.0,
            order_dow: 1,
            ..shipment()
        };
        let assessment = DelayScorer::new(1).score(&features).unwrap();
        assert!(assessment.probability < MAX_NOISE);
        assert_eq!(assessment.tier, RiskTier::Low);
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify(0.35), RiskTier::Low);
        assert_eq!(classify(0.36), RiskTier::Medium);
        assert_eq!(classify(0.6), RiskTier::Medium);
        assert_eq!(classify(0.61), RiskTier::High);
    }

    #[test]
    fn test_rejects_invalid_day_and_month() {
        let scorer = DelayScorer::new(0);
        let bad_day = ShipmentFeatures { order_dow: 7, ..shipment() };
        let bad_month = ShipmentFeatures { order_month: 0, ..shipment() };
        assert!(matches!(
            scorer.score(&bad_day),
            Err(InvalidInputError::InvalidFeature { field: "order_dow", .. })
        ));
        assert!(matches!(
            scorer.score(&bad_month),
            Err(InvalidInputError::InvalidFeature { field: "order_month", .. })
        ));
    }

    #[test]
    fn test_rejects_negative_distance_and_empty_parcel() {
        let scorer = DelayScorer::new(0);
        let negative = ShipmentFeatures { distance_km: -1.0, ..shipment() };
        let empty = ShipmentFeatures { item_count: 0, ..shipment() };
        assert!(scorer.score(&negative).is_err());
        assert!(scorer.score(&empty).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_probability_in_unit_interval(
                distance_km in 0.0..5_000.0f64,
                weight_g in 0.0..50_000.0f64,
                order_dow in 0u8..7,
                order_month in 1u8..=12,
                seed in any::<u64>()
            ) {
                let features = ShipmentFeatures {
                    distance_km,
                    weight_g,
                    order_dow,
                    order_month,
                    ..shipment()
                };
                let assessment = DelayScorer::new(seed).score(&features).unwrap();
                prop_assert!((0.0..=1.0).contains(&assessment.probability));
                prop_assert_eq!(assessment.tier, classify(assessment.probability));
            }
        }
    }
}
