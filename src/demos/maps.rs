//! Maps: `HashMap`, the entry API and ordered iteration with `BTreeMap`.

use std::collections::{BTreeMap, HashMap};

fn basics() {
    let mut ages: HashMap<&str, u32> = HashMap::new();
    ages.insert("alice", 31);
    ages.insert("bob", 27);
    ages.insert("carol", 45);

    println!("len = {}", ages.len());

    // Lookup returns Option instead of a zero value plus a flag.
    match ages.get("bob") {
        Some(age) => println!("bob is {age}"),
        None => println!("bob is unknown"),
    }
    println!("dave present? {}", ages.contains_key("dave"));
    println!("dave or default: {}", ages.get("dave").copied().unwrap_or_default());

    if let Some(old) = ages.insert("alice", 32) {
        println!("alice updated from {old} to {}", ages["alice"]);
    }

    ages.remove("carol");
    println!("after remove(\"carol\"): len = {}", ages.len());
}

fn word_count() {
    let text = "the quick brown fox jumps over the lazy dog the end";
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word).or_insert(0) += 1;
    }

    // HashMap iteration order is unspecified; sort for display.
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (word, n) in sorted.iter().take(4) {
        println!("  {word:<6} {n}");
    }
}

fn ordered() {
    let mut scores = BTreeMap::new();
    scores.insert("zoe", 88);
    scores.insert("adam", 92);
    scores.insert("mia", 75);

    println!("BTreeMap iterates in key order:");
    for (name, score) in &scores {
        println!("  {name}: {score}");
    }
    let first_half: Vec<_> = scores.range("a".."n").map(|(k, _)| *k).collect();
    println!("keys in a..n: {:?}", first_half);
}

fn nested() {
    let mut groups: HashMap<String, Vec<String>> = HashMap::new();
    for (team, member) in [("red", "ann"), ("blue", "ben"), ("red", "cat")] {
        groups.entry(team.to_string()).or_default().push(member.to_string());
    }
    let mut teams: Vec<_> = groups.keys().cloned().collect();
    teams.sort();
    for team in teams {
        println!("  {team}: {:?}", groups[&team]);
    }
}

pub fn run() {
    println!("=== Maps ===\n");

    println!("--- Insert, lookup, remove ---");
    basics();

    println!("\n--- Entry API ---");
    word_count();

    println!("\n--- Ordered maps ---");
    ordered();

    println!("\n--- Map of slices ---");
    nested();

    println!("\n=== Key Points ===");
    println!("1. get() returns Option<&V>; absence is explicit");
    println!("2. entry() does lookup-or-insert in one step");
    println!("3. Use BTreeMap when iteration order matters");
}
