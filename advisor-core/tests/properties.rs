use advisor_core::{
    ConditionGroup, Config, Observation, WeatherSnapshot, assess, clothing, dew_point, umbrella,
    uv,
};
use rstest::rstest;

fn base() -> WeatherSnapshot {
    WeatherSnapshot {
        temp: 25.0,
        feels_like: 25.0,
        humidity: 40,
        pressure: 1015.0,
        visibility: 10000.0,
        wind_speed: 1.0,
        clouds: 10,
        condition_group: ConditionGroup::Clear,
        precip_volume_mm: 0.0,
        uv_index: Some(5.0),
        sunrise: None,
        sunset: None,
        observed_at: None,
    }
}

fn score(snapshot: &WeatherSnapshot) -> f64 {
    umbrella::predict(snapshot, &Config::default().umbrella).score
}

fn assert_non_decreasing(scores: &[f64], what: &str) {
    for pair in scores.windows(2) {
        assert!(pair[1] >= pair[0], "{what}: score fell from {} to {}", pair[0], pair[1]);
    }
}

#[test]
fn umbrella_score_is_monotonic_in_every_indicator() {
    let steps = 0..=20;

    let precip: Vec<f64> = steps
        .clone()
        .map(|i| score(&WeatherSnapshot { precip_volume_mm: f64::from(i) * 0.5, ..base() }))
        .collect();
    assert_non_decreasing(&precip, "precipitation");

    let humidity: Vec<f64> = steps
        .clone()
        .map(|i| score(&WeatherSnapshot { humidity: (i * 5) as u8, ..base() }))
        .collect();
    assert_non_decreasing(&humidity, "humidity");

    let clouds: Vec<f64> = steps
        .clone()
        .map(|i| score(&WeatherSnapshot { clouds: (i * 5) as u8, ..base() }))
        .collect();
    assert_non_decreasing(&clouds, "clouds");

    // Falling pressure and falling visibility are the stronger signals.
    let pressure: Vec<f64> = steps
        .clone()
        .map(|i| score(&WeatherSnapshot { pressure: 1030.0 - f64::from(i) * 3.0, ..base() }))
        .collect();
    assert_non_decreasing(&pressure, "pressure");

    let visibility: Vec<f64> = steps
        .clone()
        .map(|i| score(&WeatherSnapshot { visibility: 10000.0 - f64::from(i) * 500.0, ..base() }))
        .collect();
    assert_non_decreasing(&visibility, "visibility");

    let conditions: Vec<f64> = [
        ConditionGroup::Clear,
        ConditionGroup::Drizzle,
        ConditionGroup::Rain,
        ConditionGroup::Thunderstorm,
    ]
    .into_iter()
    .map(|group| score(&WeatherSnapshot { condition_group: group, ..base() }))
    .collect();
    assert_non_decreasing(&conditions, "condition");
}

#[test]
fn raising_one_probability_never_lowers_the_fused_score() {
    let others = [0.1, 0.35, 0.0, 0.6];
    let mut previous = 0.0;

    for step in 0..=10 {
        let p = f64::from(step) / 10.0;
        let fused = umbrella::fuse(others.iter().copied().chain([p]));
        assert!(fused >= previous);
        previous = fused;
    }
}

#[test]
fn umbrella_score_is_bounded_with_every_indicator_maxed() {
    let storm = WeatherSnapshot {
        temp: 20.0,
        feels_like: 20.0,
        humidity: 100,
        pressure: 950.0,
        visibility: 0.0,
        clouds: 100,
        condition_group: ConditionGroup::Thunderstorm,
        precip_volume_mm: 50.0,
        ..base()
    };
    let rec = umbrella::predict(&storm, &Config::default().umbrella);

    assert_eq!(rec.score, 1.0);
    assert!(rec.recommend);
    assert_eq!(rec.reasons.len(), 7);
}

#[test]
fn dew_point_never_exceeds_temperature() {
    for temp in [-30.0, -5.0, 0.0, 12.5, 25.0, 40.0] {
        for humidity in 1..=100 {
            let dp = dew_point(temp, f64::from(humidity)).expect("defined above 0%");
            assert!(dp <= temp, "dew point {dp} above {temp} at {humidity}%");
        }
        let saturated = dew_point(temp, 100.0).expect("defined");
        assert!((saturated - temp).abs() < 1e-9);
    }
}

#[rstest]
#[case(2.999, "Low")]
#[case(3.0, "Moderate")]
#[case(5.999, "Moderate")]
#[case(6.0, "High")]
#[case(10.999, "Very High")]
#[case(11.0, "Extreme")]
fn uv_boundaries_are_exact(#[case] index: f64, #[case] category: &str) {
    let rec = uv::advise(Some(index), &Config::default().uv).expect("in range");
    assert_eq!(rec.category, category);
}

#[rstest]
#[case(27.999, "Warm")]
#[case(28.0, "Hot")]
#[case(14.999, "Cold")]
#[case(15.0, "Cool")]
fn clothing_boundaries_are_exact(#[case] effective: f64, #[case] category: &str) {
    let snapshot = WeatherSnapshot { temp: effective, feels_like: effective, ..base() };
    let rec = clothing::advise(&snapshot, &Config::default().clothing);

    assert_eq!(rec.temperature.effective, effective);
    assert_eq!(rec.category, category);
}

#[test]
fn repeated_calls_are_byte_identical() {
    let cfg = Config::default();
    let snapshot = WeatherSnapshot {
        condition_group: ConditionGroup::Rain,
        humidity: 88,
        wind_speed: 7.0,
        ..base()
    };

    let first = serde_json::to_string(&assess(&snapshot, &cfg)).expect("serializable");
    let second = serde_json::to_string(&assess(&snapshot, &cfg)).expect("serializable");

    assert_eq!(first, second);
}

#[test]
fn scenario_heavy_rain() {
    let snapshot = WeatherSnapshot {
        temp: 27.0,
        feels_like: 30.0,
        condition_group: ConditionGroup::Thunderstorm,
        precip_volume_mm: 6.0,
        humidity: 92,
        clouds: 95,
        pressure: 1000.0,
        visibility: 3000.0,
        ..base()
    };
    let rec = umbrella::predict(&snapshot, &Config::default().umbrella);

    assert!(rec.recommend);
    assert!(rec.score >= 0.9);
    assert_eq!(rec.reasons[0], "Measured precipitation (6.0 mm)");
}

#[test]
fn scenario_clear_dry_day() {
    let rec = umbrella::predict(&base(), &Config::default().umbrella);

    assert!(!rec.recommend);
    assert!(rec.score <= 0.1);
}

#[test]
fn scenario_extreme_uv() {
    let rec = uv::advise(Some(12.0), &Config::default().uv).expect("in range");

    assert_eq!(rec.category, "Extreme");
    assert_eq!(rec.color, "purple");
    assert!(rec.protection_needed);
    assert!(rec.warning.is_some());
}

#[test]
fn scenario_cold_windy_day() {
    let snapshot = WeatherSnapshot {
        temp: 12.0,
        feels_like: 10.0,
        wind_speed: 8.0,
        humidity: 50,
        condition_group: ConditionGroup::Clear,
        ..base()
    };
    let rec = clothing::advise(&snapshot, &Config::default().clothing);

    assert_eq!(rec.category, "Cold");
    assert!(rec.conditions.windy);
    assert!(rec.clothing_items.iter().any(|item| item.contains("Windbreaker")));
}

#[test]
fn observation_json_through_to_assessment() {
    let json = r#"{
        "temp": 31.0, "feels_like": 38.0, "humidity": 74, "pressure": 1004,
        "visibility": 10000, "wind_speed": 4.47, "clouds": 75,
        "condition_group": "Clouds"
    }"#;

    let obs = Observation::from_json(json).expect("valid json");
    let snapshot = WeatherSnapshot::try_from(obs).expect("valid observation");
    let report = assess(&snapshot, &Config::default());

    assert!(report.uv_recommendations.is_none());
    assert!((0.0..=1.0).contains(&report.umbrella_recommendation.score));
    assert_eq!(report.clothing_recommendations.category, "Very Hot");
}
