//! Great-circle distance between two coordinate strings.
//!
//! Run with: cargo run --example distance -- "40.7128, -74.0060" "34.0522, -118.2437"

use geocoord::{CoordError, Converter};
use std::env;

fn main() -> Result<(), CoordError> {
    let mut args = env::args().skip(1);
    let from = args.next().unwrap_or_else(|| "40.7128, -74.0060".to_string());
    let to = args.next().unwrap_or_else(|| "34.0522, -118.2437".to_string());

    let result = Converter::default().distance(&from, &to)?;

    println!("From:            {}", from);
    println!("To:              {}", to);
    println!(
        "Distance:        {:.2} m ({:.3} km)",
        result.distance_meters,
        result.distance_km()
    );
    println!("Forward bearing: {:.2}°", result.forward_bearing_deg);
    println!("Reverse bearing: {:.2}°", result.reverse_bearing_deg);

    Ok(())
}
