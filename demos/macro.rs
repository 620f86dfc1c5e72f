//! Building values with the qs! macro.
//!
//! Run with: cargo run --example macro

use nested_qs::{parse, qs, stringify};

fn main() {
    let value = qs!({
        "search": "rust crates",
        "page": 2,
        "filter": {
            "license": ["MIT", "Apache-2.0"],
            "downloads": {"min": 1000}
        },
        "cursor": null
    });

    let text = stringify(&value);
    println!("Stringified:\n{}\n", text);

    let back = parse(&text);
    println!("Parsed back:\n{}\n", back);

    // null leaves are written as empty values and come back as ""
    assert_eq!(back.get("cursor"), Some(&qs!("")));
    assert_eq!(back.get("filter"), value.get("filter"));
    println!("✓ Nested structure preserved");
}
