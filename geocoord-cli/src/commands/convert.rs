use anyhow::{Context, Result};
use geocoord::{Converter, Target};

pub fn run(converter: &Converter, input: &str, target: Target, json: bool) -> Result<()> {
    let record = converter
        .convert(input, target)
        .with_context(|| format!("Failed to convert '{}' to {}", input, target))?;

    if json {
        println!("{}", serde_json::to_string(&record)?);
    } else {
        println!("{}", record.output);
    }

    Ok(())
}
