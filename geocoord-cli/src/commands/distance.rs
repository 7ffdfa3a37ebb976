use anyhow::{Context, Result};
use geocoord::Converter;
use serde::Serialize;

#[derive(Serialize)]
struct DistanceResponse {
    distance_meters: f64,
    distance_km: f64,
    forward_bearing_deg: f64,
    reverse_bearing_deg: f64,
}

pub fn run(converter: &Converter, from: &str, to: &str, json: bool) -> Result<()> {
    let result = converter
        .distance(from, to)
        .context("Failed to calculate distance")?;

    if json {
        let response = DistanceResponse {
            distance_meters: result.distance_meters,
            distance_km: result.distance_km(),
            forward_bearing_deg: result.forward_bearing_deg,
            reverse_bearing_deg: result.reverse_bearing_deg,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!(
            "Distance: {:.2} m ({:.3} km)",
            result.distance_meters,
            result.distance_km()
        );
        println!("Forward bearing: {:.2}°", result.forward_bearing_deg);
        println!("Reverse bearing: {:.2}°", result.reverse_bearing_deg);
    }

    Ok(())
}
