//! Basic example demonstrating geocoord library usage.
//!
//! Run with: cargo run --example basic -- "N45°30'15\" W122°40'30\""

use geocoord::{CoordError, Converter};
use std::env;

fn main() -> Result<(), CoordError> {
    let inputs: Vec<String> = {
        let args: Vec<String> = env::args().skip(1).collect();
        if args.is_empty() {
            vec![
                "N45°30'15\" W122°40'30\"".to_string(),
                "45.5042, -122.6751".to_string(),
                "18T 583959 4507351".to_string(),
                "95°00'00\"N 10°00'00\"E".to_string(),
            ]
        } else {
            args
        }
    };

    let converter = Converter::builder().decimal_precision(6).build();

    for input in &inputs {
        println!("{}", input);
        println!("{:-<50}", "");
        println!("  Format:  {}", converter.detect(input));

        match converter.to_decimal(input) {
            Ok(decimal) => println!("  Decimal: {}", decimal),
            Err(e) => {
                println!("  Error:   {}", e);
                println!();
                continue;
            }
        }

        println!("  DMS:     {}", converter.to_dms(input)?);
        println!("  UTM:     {}", converter.to_utm(input)?);
        println!();
    }

    Ok(())
}
