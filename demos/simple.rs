//! Basic query string serialization and deserialization.
//!
//! Run with: cargo run --example simple

use nested_qs::{from_str, to_string};
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Invite {
    team: String,
    users: Vec<User>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let invite = Invite {
        team: "platform".to_string(),
        users: vec![
            User {
                id: 42,
                name: "Alice Johnson".to_string(),
                email: "alice@example.com".to_string(),
            },
            User {
                id: 43,
                name: "Bob Smith".to_string(),
                email: "bob@example.com".to_string(),
            },
        ],
    };

    // Serialize to a query string
    let text = to_string(&invite)?;
    println!("Query string:\n{}\n", text);

    // Deserialize back to struct
    let invite_back: Invite = from_str(&text)?;
    assert_eq!(invite, invite_back);
    println!("✓ Round-trip successful");

    // Hand-written input with readable brackets works too
    let typed: Invite = from_str("team=ops&users[0][id]=7&users[0][name]=Eve&users[0][email]=eve%40example.com")?;
    println!("Parsed by hand: {:?}", typed);

    Ok(())
}
