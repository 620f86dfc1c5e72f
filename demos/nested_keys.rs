//! How bracketed keys turn into nested structure.
//!
//! Run with: cargo run --example nested_keys

use nested_qs::{parse, parse_with_options, QsOptions};

fn show(label: &str, input: &str, options: &QsOptions) {
    println!("{:<22} {:<34} => {}", label, input, parse_with_options(input, options));
}

fn main() {
    let defaults = QsOptions::default();

    println!("Objects and arrays:");
    show("nested object", "a[b][c]=d", &defaults);
    show("pushed array", "a[]=x", &defaults);
    show("repeated push", "a[]=x&a[]=y", &defaults);
    show("indexed array", "a[1]=y&a[0]=x", &defaults);
    show("repeated key", "a=1&a=2", &defaults);
    show("array of objects", "a[0][id]=1&a[1][id]=2", &defaults);
    println!();

    println!("Limits:");
    show("sparse indices", "a[1]=b&a[15]=c", &defaults);
    show("index past limit", "a[21]=x", &defaults);
    show("mixed keys", "a[0]=b&a[c]=d", &defaults);
    show(
        "depth 2",
        "a[b][c][d][e]=f",
        &QsOptions::new().with_depth(2),
    );
    println!();

    println!("Defensive parsing:");
    show("reserved name", "__proto__[admin]=1&ok=1", &defaults);
    show("bad escape", "a=%E0%A4%A", &defaults);
    show("no equals sign", "flag&b=2", &defaults);
    println!();

    // Everything above degrades instead of failing
    assert!(parse("a[b=c&&]=&=x").is_object());
}
