//! Zone-level delivery demand: a synthetic history and a short forecast.
//!
//! Demand follows a linear growth trend with two multiplicative seasonal
//! factors (Friday/Saturday and the last week of the month) and gaussian
//! noise around 1. The forecast extrapolates the trailing two-week average
//! under the same factors. Every series is drawn from a generator keyed by the
//! zone name, so a zone always produces the same curve for a given seed and day.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use rand::{rngs::StdRng, Rng};
use rand_distr::StandardNormal;

use crate::error::InvalidInputError;
use crate::models::{DemandForecast, DemandPoint, DemandStatus, ZoneSummary};
use crate::random::{keyed_rng, stable_hash};
use crate::routing::round_to;

pub const HISTORY_DAYS: usize = 60;
pub const MAX_HORIZON_DAYS: usize = 90;
const TRAILING_WINDOW_DAYS: usize = 14;

const WEEKEND_FACTOR: f64 = 1.3;
const MONTH_END_FACTOR: f64 = 1.2;
const MONTH_END_FROM_DAY: u32 = 25;
const HISTORY_NOISE_SD: f64 = 0.08;
const FORECAST_NOISE_SD: f64 = 0.05;
const SUMMARY_NOISE_SD: f64 = 0.06;

const HIGH_DEMAND_RATIO: f64 = 1.2;
const MEDIUM_DEMAND_RATIO: f64 = 0.9;

const FALLBACK_BASE: u32 = 200;
const FALLBACK_GROWTH: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub name: &'static str,
    /// Typical daily deliveries at the start of the history window.
    pub base: u32,
    /// Relative growth per 30 days.
    pub growth: f64,
}

pub const ZONES: [Zone; 10] = [
    Zone { name: "Chennai", base: 320, growth: 0.03 },
    Zone { name: "Mumbai", base: 580, growth: 0.04 },
    Zone { name: "Delhi", base: 620, growth: 0.035 },
    Zone { name: "Bangalore", base: 490, growth: 0.045 },
    Zone { name: "Hyderabad", base: 410, growth: 0.038 },
    Zone { name: "Kolkata", base: 380, growth: 0.025 },
    Zone { name: "Pune", base: 340, growth: 0.04 },
    Zone { name: "Coimbatore", base: 210, growth: 0.028 },
    Zone { name: "Madurai", base: 180, growth: 0.022 },
    Zone { name: "Ahmedabad", base: 290, growth: 0.033 },
];

/// Looks up a zone, falling back to a generic profile for unlisted names.
pub fn zone_profile(name: &str) -> (u32, f64) {
    ZONES
        .iter()
        .find(|zone| zone.name == name)
        .map(|zone| (zone.base, zone.growth))
        .unwrap_or((FALLBACK_BASE, FALLBACK_GROWTH))
}

pub fn forecast_demand(
    zone: &str,
    horizon_days: usize,
    today: NaiveDate,
    seed: u64,
) -> Result<DemandForecast, InvalidInputError> {
    if !(1..=MAX_HORIZON_DAYS).contains(&horizon_days) {
        return Err(InvalidInputError::InvalidHorizon {
            got: horizon_days,
            max: MAX_HORIZON_DAYS,
        });
    }

    let (base, growth) = zone_profile(zone);
    let mut rng = keyed_rng(seed, stable_hash([zone]));

    let history: Vec<DemandPoint> = (0..HISTORY_DAYS)
        .map(|i| {
            let date = today - TimeDelta::days((HISTORY_DAYS - i) as i64);
            let trend = f64::from(base) * (1.0 + growth * i as f64 / 30.0);
            let demand = trend * seasonal_factor(date) * noise(&mut rng, HISTORY_NOISE_SD);
            DemandPoint { date, demand: to_demand(demand) }
        })
        .collect();

    let recent_avg = trailing_average(&history, TRAILING_WINDOW_DAYS);

    let forecast: Vec<DemandPoint> = (0..horizon_days)
        .map(|i| {
            let date = today + TimeDelta::days(i as i64 + 1);
            let trend = recent_avg * (1.0 + growth * i as f64 / 30.0);
            let demand = trend * seasonal_factor(date) * noise(&mut rng, FORECAST_NOISE_SD);
            DemandPoint { date, demand: to_demand(demand) }
        })
        .collect();

    tracing::debug!(
        "forecast for {zone}: trailing average {recent_avg:.1}, {} days ahead",
        forecast.len()
    );

    Ok(DemandForecast {
        zone: zone.to_string(),
        history,
        forecast,
    })
}

/// Today's demand for every listed zone, busiest first.
pub fn zones_summary(today: NaiveDate, seed: u64) -> Vec<ZoneSummary> {
    let weekday = weekday_factor(today);
    let mut summary: Vec<ZoneSummary> = ZONES
        .iter()
        .map(|zone| {
            let key = stable_hash([zone.name]).wrapping_add(u64::from(today.day()));
            let mut rng = keyed_rng(seed, key);
            let base = f64::from(zone.base);
            let current = to_demand(base * weekday * noise(&mut rng, SUMMARY_NOISE_SD));
            let current_f = f64::from(current);

            let status = if current_f > base * HIGH_DEMAND_RATIO {
                DemandStatus::High
            } else if current_f > base * MEDIUM_DEMAND_RATIO {
                DemandStatus::Medium
            } else {
                DemandStatus::Normal
            };

            ZoneSummary {
                zone: zone.name.to_string(),
                today_demand: current,
                baseline: zone.base,
                status,
                change_pct: round_to((current_f - base) / base * 100.0, 1),
            }
        })
        .collect();

    summary.sort_by(|a, b| b.today_demand.cmp(&a.today_demand));
    summary
}

fn weekday_factor(date: NaiveDate) -> f64 {
    match date.weekday() {
        Weekday::Fri | Weekday::Sat => WEEKEND_FACTOR,
        _ => 1.0,
    }
}

fn seasonal_factor(date: NaiveDate) -> f64 {
    let month_end = if date.day() >= MONTH_END_FROM_DAY {
        MONTH_END_FACTOR
    } else {
        1.0
    };
    weekday_factor(date) * month_end
}

fn noise(rng: &mut StdRng, sd: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    1.0 + sd * z
}

fn to_demand(value: f64) -> u32 {
    value.max(0.0) as u32
}

fn trailing_average(points: &[DemandPoint], window: usize) -> f64 {
    let tail = &points[points.len().saturating_sub(window)..];
    if tail.is_empty() {
        return 0.0;
    }
    tail.iter().map(|p| f64::from(p.demand)).sum::<f64>() / tail.len() as f64
}
