//! Errors as values: `Result`, `?`, custom error enums with `thiserror`,
//! wrapping with a source, and matching on kinds.

use std::collections::HashMap;
use std::error::Error as _;
use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("key {0:?} not found")]
    Missing(String),
    #[error("key {key:?} is not a number")]
    NotANumber {
        key: String,
        #[source]
        source: ParseIntError,
    },
    #[error("port {0} is out of range")]
    OutOfRange(u32),
}

pub fn lookup(settings: &HashMap<&str, &str>, key: &str) -> Result<String, ConfigError> {
    settings
        .get(key)
        .map(|v| v.to_string())
        .ok_or_else(|| ConfigError::Missing(key.to_string()))
}

pub fn port(settings: &HashMap<&str, &str>) -> Result<u16, ConfigError> {
    let raw = lookup(settings, "port")?;
    let value: u32 = raw.parse().map_err(|source| ConfigError::NotANumber {
        key: "port".to_string(),
        source,
    })?;
    u16::try_from(value)
        .ok()
        .filter(|p| *p != 0)
        .ok_or(ConfigError::OutOfRange(value))
}

fn report(result: Result<u16, ConfigError>) {
    match result {
        Ok(port) => println!("  ok: port {port}"),
        Err(err) => {
            println!("  error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                println!("    caused by: {cause}");
                source = cause.source();
            }
            // Matching on the variant is the equivalent of checking a sentinel.
            if matches!(err, ConfigError::Missing(_)) {
                println!("    (a default could be used here)");
            }
        }
    }
}

fn boxed_errors() -> Result<i32, Box<dyn std::error::Error>> {
    let a: i32 = "20".parse()?;
    let b: i32 = "22".parse()?;
    if a + b != 42 {
        return Err("arithmetic is broken".into());
    }
    Ok(a + b)
}

pub fn run() {
    println!("=== Errors ===\n");

    println!("--- Custom error enum ---");
    let cases: [&[(&str, &str)]; 4] = [
        &[("port", "8080")],
        &[],
        &[("port", "eighty")],
        &[("port", "70000")],
    ];
    for case in cases {
        let settings: HashMap<&str, &str> = case.iter().copied().collect();
        println!("settings {:?}", case);
        report(port(&settings));
    }

    println!("\n--- Box<dyn Error> with ? ---");
    match boxed_errors() {
        Ok(v) => println!("  ok: {v}"),
        Err(e) => println!("  error: {e}"),
    }

    println!("\n--- Option to Result ---");
    let empty: Vec<i32> = Vec::new();
    let first = empty.first().ok_or("empty list");
    println!("  first of [] = {:?}", first);

    println!("\n=== Key Points ===");
    println!("1. Errors are ordinary return values, not exceptions");
    println!("2. `?` returns early and converts with From");
    println!("3. #[source] keeps the chain for reporting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn settings(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_port_parses() {
        assert_eq!(port(&settings(&[("port", "8080")])).unwrap(), 8080);
    }

    #[test]
    fn test_port_error_kinds() {
        assert!(matches!(port(&settings(&[])), Err(ConfigError::Missing(k)) if k == "port"));
        assert!(matches!(
            port(&settings(&[("port", "x")])),
            Err(ConfigError::NotANumber { .. })
        ));
        assert!(matches!(
            port(&settings(&[("port", "70000")])),
            Err(ConfigError::OutOfRange(70000))
        ));
        assert!(matches!(port(&settings(&[("port", "0")])), Err(ConfigError::OutOfRange(0))));
    }

    #[test]
    fn test_source_chain_is_kept() {
        let err = port(&settings(&[("port", "x")])).unwrap_err();
        assert!(err.source().is_some());
    }
}
