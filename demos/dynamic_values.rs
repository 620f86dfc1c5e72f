//! Working with parsed Values at runtime.
//!
//! Run with: cargo run --example dynamic_values

use nested_qs::{from_value, parse, parse_value, qs, stringify, Value};
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Paging {
    page: u32,
    per_page: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let value = parse("user[name]=Alice&user[roles][0]=admin&user[roles][1]=ops&page=2&per_page=50");
    println!("Parsed: {}\n", value);

    // Access values dynamically
    if let Some(user) = value.get("user") {
        if let Some(name) = user.get("name").and_then(Value::as_str) {
            println!("Accessing 'user[name]': {}", name);
        }
        if let Some(roles) = user.get("roles").and_then(Value::as_array) {
            println!("Accessing 'user[roles]': {} items", roles.len());
        }
    }

    if let Some(page) = value.get("page").and_then(Value::as_i64) {
        println!("Accessing 'page': {}\n", page);
    }

    // Pick a typed view out of the dynamic value
    let paging: Paging = from_value(value.clone())?;
    println!("Typed paging: {:?}\n", paging);

    // Re-expand a flat map as it might arrive from a web framework
    let raw = qs!({"sort[field]": "created", "sort[dir]": "desc", "q": "serde"});
    let expanded = parse_value(raw);
    println!("Expanded: {}", expanded);
    println!("Stringified: {}", stringify(&expanded));

    Ok(())
}
