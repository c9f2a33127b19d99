use advisor_core::{ConditionGroup, Observation};
use anyhow::Result;
use inquire::{CustomType, Select, Text};

/// Ask for every observation field. Validation happens afterwards, on the
/// snapshot, so range errors name the field the same way file input does.
pub fn observation() -> Result<Observation> {
    let location = Text::new("Location (optional):").prompt_skippable()?;

    let temp = number("Temperature (°C):")?;
    let feels_like = CustomType::<f64>::new("Feels like (°C):")
        .with_default(temp)
        .prompt()?;
    let humidity = number("Relative humidity (%):")?;
    let pressure = CustomType::<f64>::new("Pressure (hPa):")
        .with_default(1013.0)
        .prompt()?;
    let visibility = CustomType::<f64>::new("Visibility (m):")
        .with_default(10000.0)
        .prompt()?;
    let wind_speed = number("Wind speed (m/s):")?;
    let clouds = number("Cloud cover (%):")?;

    let condition_group =
        Select::new("Current conditions:", ConditionGroup::all().to_vec()).prompt()?;

    let precip_volume_mm = CustomType::<f64>::new("Precipitation over the last hour (mm):")
        .with_default(0.0)
        .prompt()?;
    let uv_index = CustomType::<f64>::new("UV index:")
        .with_help_message("Press Esc if no UV reading is available")
        .prompt_skippable()?;

    Ok(Observation {
        location: location.filter(|l| !l.trim().is_empty()),
        temp: Some(temp),
        feels_like: Some(feels_like),
        humidity: Some(humidity),
        pressure: Some(pressure),
        visibility: Some(visibility),
        wind_speed: Some(wind_speed),
        clouds: Some(clouds),
        condition_group: Some(condition_group),
        precip_volume_mm: Some(precip_volume_mm),
        uv_index,
        ..Observation::default()
    })
}

fn number(message: &str) -> Result<f64> {
    Ok(CustomType::<f64>::new(message)
        .with_error_message("Please enter a number")
        .prompt()?)
}
