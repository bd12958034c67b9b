//! Type conversion: numeric casts, `From`/`TryFrom`, parsing and formatting.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

fn numeric_casts() {
    let i: i32 = 42;
    let f = i as f64;
    let u = f as u32;
    println!("i32 {i} -> f64 {f} -> u32 {u}");

    // `as` truncates and saturates silently.
    let big: i64 = 300;
    println!("300i64 as u8   = {}", big as u8);
    println!("-1i32 as u32   = {}", -1i32 as u32);
    println!("3.99f64 as i32 = {}", 3.99f64 as i32);
    println!("1e10 as i32    = {}", 1e10f64 as i32);

    // Lossless widening has a From impl.
    let widened: i64 = i64::from(i);
    println!("i64::from(42i32) = {widened}");
}

fn checked_conversions() {
    for value in [200i32, 300, -5] {
        match u8::try_from(value) {
            Ok(b) => println!("u8::try_from({value}) = Ok({b})"),
            Err(e) => println!("u8::try_from({value}) = Err({e})"),
        }
    }
}

fn strings_and_numbers() {
    let n = 123;
    let s = n.to_string();
    println!("to_string: {s:?}");

    for input in ["456", "4x6", ""] {
        let parsed: Result<i32, ParseIntError> = input.parse();
        println!("{input:?}.parse::<i32>() = {parsed:?}");
    }

    let hex = i64::from_str_radix("ff", 16);
    println!("from_str_radix(\"ff\", 16) = {hex:?}");
    println!("255 as hex {:x}, binary {:b}", 255, 255);

    let bytes = "héllo".as_bytes().to_vec();
    let back = String::from_utf8(bytes.clone());
    println!("bytes {:?} -> {:?}", bytes, back);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celsius(pub f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fahrenheit(pub f64);

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TemperatureError {
    #[error("missing unit suffix (C or F)")]
    MissingUnit,
    #[error("unknown unit {0:?}")]
    UnknownUnit(char),
    #[error("invalid number: {0}")]
    Number(String),
}

impl FromStr for Celsius {
    type Err = TemperatureError;

    /// Accepts `"21.5C"` or `"70F"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unit = s.chars().last().ok_or(TemperatureError::MissingUnit)?;
        let number = &s[..s.len() - unit.len_utf8()];
        if unit.is_ascii_digit() {
            return Err(TemperatureError::MissingUnit);
        }
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|e: std::num::ParseFloatError| TemperatureError::Number(e.to_string()))?;
        match unit.to_ascii_uppercase() {
            'C' => Ok(Celsius(value)),
            'F' => Ok(Celsius((value - 32.0) * 5.0 / 9.0)),
            other => Err(TemperatureError::UnknownUnit(other)),
        }
    }
}

fn custom_conversions() {
    let boiling = Celsius(100.0);
    let f: Fahrenheit = boiling.into();
    println!("{boiling} -> {:?}", f);

    for input in ["21.5C", "212F", "30K", "hot C", "42"] {
        match input.parse::<Celsius>() {
            Ok(c) => println!("{input:>6} -> {c}"),
            Err(e) => println!("{input:>6} -> error: {e}"),
        }
    }
}

pub fn run() {
    println!("=== Type Conversion ===\n");

    println!("--- Numeric casts ---");
    numeric_casts();

    println!("\n--- Checked conversions ---");
    checked_conversions();

    println!("\n--- Strings and numbers ---");
    strings_and_numbers();

    println!("\n--- Your own types ---");
    custom_conversions();

    println!("\n=== Key Points ===");
    println!("1. There are no implicit numeric conversions");
    println!("2. `as` never fails; TryFrom reports out-of-range values");
    println!("3. Implement From/FromStr and get into()/parse() for free");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_celsius_and_fahrenheit() {
        assert_eq!("21.5C".parse::<Celsius>(), Ok(Celsius(21.5)));
        assert_eq!("212F".parse::<Celsius>(), Ok(Celsius(100.0)));
        assert_eq!("0 c".parse::<Celsius>(), Ok(Celsius(0.0)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("30K".parse::<Celsius>(), Err(TemperatureError::UnknownUnit('K')));
        assert_eq!("42".parse::<Celsius>(), Err(TemperatureError::MissingUnit));
        assert_eq!("".parse::<Celsius>(), Err(TemperatureError::MissingUnit));
        assert!(matches!("hot C".parse::<Celsius>(), Err(TemperatureError::Number(_))));
    }

    #[test]
    fn test_celsius_into_fahrenheit() {
        let f: Fahrenheit = Celsius(-40.0).into();
        assert_eq!(f, Fahrenheit(-40.0));
    }
}
