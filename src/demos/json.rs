//! JSON with serde: derive, field renames, optional fields, and untyped
//! `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip)]
    pub password_hash: String,
}

fn encode() {
    let user = User {
        id: 7,
        display_name: "Ada".into(),
        email: None,
        tags: vec!["admin".into()],
        password_hash: "not-serialized".into(),
    };
    match serde_json::to_string(&user) {
        Ok(s) => println!("compact: {s}"),
        Err(e) => println!("error: {e}"),
    }
    match serde_json::to_string_pretty(&user) {
        Ok(s) => println!("pretty:\n{s}"),
        Err(e) => println!("error: {e}"),
    }
}

fn decode() {
    let inputs = [
        r#"{"id": 1, "displayName": "Linus", "email": "l@example.com"}"#,
        r#"{"id": 2, "displayName": "Grace", "tags": ["navy", "cobol"]}"#,
        r#"{"id": "three", "displayName": "Oops"}"#,
    ];
    for input in inputs {
        match serde_json::from_str::<User>(input) {
            Ok(user) => println!("  ok: {:?}", user),
            Err(err) => println!("  error at line {} column {}: {err}", err.line(), err.column()),
        }
    }
}

fn untyped() {
    let doc: Value = json!({
        "service": "tour",
        "ports": [8080, 8443],
        "limits": { "rps": 100 }
    });
    println!("service = {}", doc["service"]);
    println!("second port = {}", doc["ports"][1]);
    println!("rps as u64 = {:?}", doc["limits"]["rps"].as_u64());
    println!("missing key = {}", doc["nope"]);
}

pub fn run() {
    println!("=== JSON ===\n");

    println!("--- Encoding ---");
    encode();

    println!("\n--- Decoding ---");
    decode();

    println!("\n--- Untyped values ---");
    untyped();

    println!("\n=== Key Points ===");
    println!("1. #[derive(Serialize, Deserialize)] replaces struct tags");
    println!("2. Option + default handle missing fields");
    println!("3. Value is for documents without a fixed shape");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_and_skips() {
        let user = User {
            id: 1,
            display_name: "Ada".into(),
            email: None,
            tags: vec![],
            password_hash: "secret".into(),
        };
        let encoded = serde_json::to_value(&user).unwrap();
        assert_eq!(encoded, json!({ "id": 1, "displayName": "Ada", "tags": [] }));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let user: User = serde_json::from_str(r#"{"id": 3, "displayName": "Bo"}"#).unwrap();
        assert_eq!(user.email, None);
        assert!(user.tags.is_empty());
        assert!(user.password_hash.is_empty());
    }
}
