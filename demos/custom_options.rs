//! Customizing parsing and output with QsOptions.
//!
//! Run with: cargo run --example custom_options

use nested_qs::{parse_with_options, qs, stringify_with_options, Delimiter, QsOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let value = qs!({"name": "MyApp", "version": "1.0.0", "features": ["auth", "cache"]});

    // Default delimiter
    println!("Default (&):");
    println!("{}\n", stringify_with_options(&value, &QsOptions::default()));

    // Semicolon delimiter
    println!("Semicolon delimiter:");
    let semicolon = QsOptions::new().with_delimiter(Delimiter::literal(";"));
    let text = stringify_with_options(&value, &semicolon);
    println!("{}", text);
    println!("parsed back: {}\n", parse_with_options(&text, &semicolon));

    // Any of several delimiters when reading
    println!("Pattern delimiter:");
    let mixed = QsOptions::new().with_delimiter(Delimiter::pattern(r"[;,&]")?);
    println!("{}\n", parse_with_options("a=1;b=2,c=3&d=4", &mixed));

    // Tighter limits for untrusted input
    println!("Strict limits:");
    let strict = QsOptions::new()
        .with_depth(1)
        .with_array_limit(3)
        .with_parameter_limit(4);
    println!("{}", parse_with_options("a[b][c]=1&list[5]=x&p=1&q=2&r=3", &strict));

    // And looser ones for trusted input
    println!("\nNo parameter limit:");
    let relaxed = QsOptions::new().with_array_limit(1000).unlimited_parameters();
    let long = (0..1500).map(|i| format!("i[{}]={}", i, i)).collect::<Vec<_>>().join("&");
    let parsed = parse_with_options(&long, &relaxed);
    println!(
        "kept {} entries",
        parsed.get("i").and_then(|v| v.as_object()).map_or(0, |m| m.len())
    );

    Ok(())
}
