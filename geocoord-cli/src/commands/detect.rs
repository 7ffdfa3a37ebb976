use anyhow::Result;
use geocoord::{Converter, CoordinateFormat};
use serde::Serialize;

#[derive(Serialize)]
struct DetectResponse<'a> {
    input: &'a str,
    format: CoordinateFormat,
}

pub fn run(converter: &Converter, input: &str, json: bool) -> Result<()> {
    let format = converter.detect(input);

    if json {
        let response = DetectResponse { input, format };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("{}", format);
    }

    Ok(())
}
