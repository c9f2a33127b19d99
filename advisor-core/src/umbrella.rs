//! Umbrella predictor.
//!
//! Each rain indicator is turned into an independent probability and the
//! probabilities are fused with a noisy-OR: `score = 1 - Π(1 - p_i)`. A single
//! strong indicator is enough to push the score up, the result stays inside
//! `[0, 1]`, and raising any one indicator never lowers the score.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{AdvisorError, Result},
    model::{ConditionGroup, WeatherSnapshot},
};

/// Tunable thresholds for the umbrella indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UmbrellaConfig {
    /// Minimum fused score for `recommend = true`.
    pub recommend_threshold: f64,
    pub thunderstorm_probability: f64,
    pub rain_probability: f64,
    pub drizzle_probability: f64,
    /// Precipitation volume (mm) at which that indicator saturates at 1.
    pub precip_saturation_mm: f64,
    /// Temperature/dew point spread (°C) below which the air counts as near saturation.
    pub dew_point_spread_c: f64,
    pub humidity_floor_pct: f64,
    pub humidity_span_pct: f64,
    pub clouds_floor_pct: f64,
    pub clouds_span_pct: f64,
    pub reference_pressure_hpa: f64,
    pub pressure_span_hpa: f64,
    /// Visibility (m) below which the indicator starts rising; also its span.
    pub visibility_floor_m: f64,
}

impl Default for UmbrellaConfig {
    fn default() -> Self {
        Self {
            recommend_threshold: 0.5,
            thunderstorm_probability: 0.9,
            rain_probability: 0.75,
            drizzle_probability: 0.6,
            precip_saturation_mm: 4.0,
            dew_point_spread_c: 5.0,
            humidity_floor_pct: 70.0,
            humidity_span_pct: 30.0,
            clouds_floor_pct: 60.0,
            clouds_span_pct: 40.0,
            reference_pressure_hpa: 1013.0,
            pressure_span_hpa: 20.0,
            visibility_floor_m: 5000.0,
        }
    }
}

impl UmbrellaConfig {
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("umbrella.recommend_threshold", self.recommend_threshold),
            ("umbrella.thunderstorm_probability", self.thunderstorm_probability),
            ("umbrella.rain_probability", self.rain_probability),
            ("umbrella.drizzle_probability", self.drizzle_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(AdvisorError::config(format!("{name} must be within 0..=1, got {p}")));
            }
        }

        // A stronger condition must never score below a weaker one.
        if self.thunderstorm_probability < self.rain_probability
            || self.rain_probability < self.drizzle_probability
        {
            return Err(AdvisorError::config(format!(
                "umbrella condition probabilities must satisfy thunderstorm >= rain >= drizzle, \
                 got {} / {} / {}",
                self.thunderstorm_probability, self.rain_probability, self.drizzle_probability
            )));
        }

        let spans = [
            ("umbrella.precip_saturation_mm", self.precip_saturation_mm),
            ("umbrella.dew_point_spread_c", self.dew_point_spread_c),
            ("umbrella.humidity_span_pct", self.humidity_span_pct),
            ("umbrella.clouds_span_pct", self.clouds_span_pct),
            ("umbrella.pressure_span_hpa", self.pressure_span_hpa),
            ("umbrella.visibility_floor_m", self.visibility_floor_m),
        ];
        for (name, span) in spans {
            if !span.is_finite() || span <= 0.0 {
                return Err(AdvisorError::config(format!("{name} must be positive, got {span}")));
            }
        }

        Ok(())
    }
}

/// Sources of rain evidence, in tie-break order for `reasons`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Condition,
    Precipitation,
    DewPoint,
    Humidity,
    Clouds,
    Pressure,
    Visibility,
}

/// One indicator's contribution to the fused score.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub indicator: Indicator,
    pub probability: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UmbrellaRecommendation {
    pub score: f64,
    pub recommend: bool,
    /// Most influential indicator first; empty when `score` is 0.
    pub reasons: Vec<String>,
}

pub fn predict(snapshot: &WeatherSnapshot, config: &UmbrellaConfig) -> UmbrellaRecommendation {
    let mut signals = signals(snapshot, config);

    let score = fuse(signals.iter().map(|s| s.probability));
    let recommend = score >= config.recommend_threshold;

    // Stable sort keeps indicator order for ties.
    signals.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    let reasons = signals.into_iter().map(|s| s.reason).collect::<Vec<_>>();

    debug!(score, recommend, indicators = reasons.len(), "umbrella prediction");

    UmbrellaRecommendation { score, recommend, reasons }
}

/// Noisy-OR union of independent probabilities. Inputs are clamped to `[0, 1]`.
pub fn fuse<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let miss = probabilities
        .into_iter()
        .map(unit)
        .fold(1.0, |acc, p| acc * (1.0 - p));
    unit(1.0 - miss)
}

/// Every indicator that moves the score, in [`Indicator`] order.
pub fn signals(snapshot: &WeatherSnapshot, config: &UmbrellaConfig) -> Vec<Signal> {
    let mut out = Vec::with_capacity(7);
    // Anything at or below EPSILON would vanish in `1 - p` and leave a reason
    // without a score.
    let mut push = |indicator, probability: f64, reason: String| {
        if probability > f64::EPSILON {
            out.push(Signal { indicator, probability, reason });
        }
    };

    let (p, label) = condition_probability(snapshot.condition_group, config);
    push(Indicator::Condition, p, label.to_string());

    push(
        Indicator::Precipitation,
        unit(snapshot.precip_volume_mm / config.precip_saturation_mm),
        format!("Measured precipitation ({:.1} mm)", snapshot.precip_volume_mm),
    );

    if let Some(dew_point) = snapshot.dew_point() {
        let spread = snapshot.temp - dew_point;
        push(
            Indicator::DewPoint,
            unit(1.0 - spread / config.dew_point_spread_c),
            format!(
                "Near-saturated air (dew point {dew_point:.1}°C vs {:.1}°C)",
                snapshot.temp
            ),
        );
    }

    push(
        Indicator::Humidity,
        unit((f64::from(snapshot.humidity) - config.humidity_floor_pct) / config.humidity_span_pct),
        format!("High humidity ({}%)", snapshot.humidity),
    );

    push(
        Indicator::Clouds,
        unit((f64::from(snapshot.clouds) - config.clouds_floor_pct) / config.clouds_span_pct),
        format!("Heavy cloud cover ({}%)", snapshot.clouds),
    );

    push(
        Indicator::Pressure,
        unit((config.reference_pressure_hpa - snapshot.pressure) / config.pressure_span_hpa),
        format!("Low atmospheric pressure ({:.0} hPa)", snapshot.pressure),
    );

    push(
        Indicator::Visibility,
        unit((config.visibility_floor_m - snapshot.visibility) / config.visibility_floor_m),
        format!("Reduced visibility ({:.0} m)", snapshot.visibility),
    );

    out
}

fn condition_probability(group: ConditionGroup, config: &UmbrellaConfig) -> (f64, &'static str) {
    match group {
        ConditionGroup::Thunderstorm => (config.thunderstorm_probability, "Thunderstorm reported"),
        ConditionGroup::Rain => (config.rain_probability, "Active rain reported"),
        ConditionGroup::Drizzle => (config.drizzle_probability, "Drizzle reported"),
        _ => (0.0, ""),
    }
}

/// Clamp into `[0, 1]`; `NaN` counts as no signal.
fn unit(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}
