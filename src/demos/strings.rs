//! Strings: UTF-8 bytes vs chars, `String` vs `&str`, building strings,
//! and pattern matching with `regex`.

use std::fmt::Write as _;

use regex::Regex;

fn bytes_and_chars() {
    let s = "héllo, 世界";
    println!("{s:?}: {} bytes, {} chars", s.len(), s.chars().count());

    for (i, c) in s.char_indices().take(3) {
        println!("  byte offset {i}: {c:?} ({} bytes)", c.len_utf8());
    }
    println!("  first byte 0x{:02x}", s.as_bytes()[0]);

    // Slicing is by byte offset and must land on a char boundary.
    println!("  &s[0..1] = {:?}", &s[0..1]);
    println!("  s.get(0..2) = {:?} (splits 'é')", s.get(0..2));
}

fn owned_and_borrowed() {
    let literal: &str = "static text";
    let mut owned: String = literal.to_owned();
    owned.push_str(", now growable");
    owned.push('!');
    println!("{owned}");

    fn shout(s: &str) -> String {
        s.to_uppercase()
    }
    println!("shout(&owned) = {}", shout(&owned));
}

fn building() {
    let mut out = String::with_capacity(64);
    for i in 1..=3 {
        let _ = write!(out, "item{i};");
    }
    println!("write! into String: {out}");

    let parts = ["a", "b", "c"];
    println!("join: {}", parts.join("-"));
    println!("concat: {}", parts.concat());
    println!("repeat: {}", "ab".repeat(3));
}

fn common_operations() {
    let line = "  key = value with spaces  ";
    let trimmed = line.trim();
    if let Some((k, v)) = trimmed.split_once('=') {
        println!("split_once: key={:?} value={:?}", k.trim(), v.trim());
    }
    println!("contains(\"value\") = {}", line.contains("value"));
    println!("replace: {}", trimmed.replace("spaces", "tabs"));
    let fields: Vec<&str> = "a,b,,c".split(',').collect();
    println!("split(','): {:?}", fields);
    let words: Vec<&str> = "one  two\tthree".split_whitespace().collect();
    println!("split_whitespace: {:?}", words);
}

fn patterns() {
    let log = "2024-03-01 ERROR disk full\n2024-03-02 INFO ok\n2024-03-03 ERROR fan failure";
    let re = match Regex::new(r"(?m)^(\d{4}-\d{2}-\d{2}) ERROR (.+)$") {
        Ok(re) => re,
        Err(err) => {
            println!("error: {err}");
            return;
        }
    };
    for caps in re.captures_iter(log) {
        println!("  {} -> {}", &caps[1], &caps[2]);
    }
}

pub fn run() {
    println!("=== Strings ===\n");

    println!("--- Bytes and chars ---");
    bytes_and_chars();

    println!("\n--- String and &str ---");
    owned_and_borrowed();

    println!("\n--- Building ---");
    building();

    println!("\n--- Everyday operations ---");
    common_operations();

    println!("\n--- Regular expressions ---");
    patterns();

    println!("\n=== Key Points ===");
    println!("1. Strings are UTF-8; len() counts bytes");
    println!("2. &str borrows, String owns");
    println!("3. Index by byte range, iterate by chars()");
}
