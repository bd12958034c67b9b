//! Structs and methods: value receivers, reference receivers, constructors.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Vertex {
    x: f64,
    y: f64,
}

impl Vertex {
    const ORIGIN: Vertex = Vertex { x: 0.0, y: 0.0 };

    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    // Takes `self` by reference: reads only.
    fn abs(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    // Takes `self` by mutable reference: changes the caller's value.
    fn scale(&mut self, factor: f64) {
        self.x *= factor;
        self.y *= factor;
    }

    // Takes `self` by value: consumes a copy and returns a new one.
    fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

#[derive(Debug, Default)]
struct Account {
    owner: String,
    balance_cents: i64,
    frozen: bool,
}

fn literals_and_defaults() {
    let v = Vertex::new(3.0, 4.0);
    println!("v = {v}, |v| = {}", v.abs());
    println!("debug: {:?}", v);
    println!("origin: {}", Vertex::ORIGIN);

    let a = Account {
        owner: "alice".into(),
        ..Default::default()
    };
    println!(
        "account with defaults: owner={} balance={} frozen={}",
        a.owner, a.balance_cents, a.frozen
    );

    // Anonymous struct equivalent: a tuple or a local struct.
    let point = (1, "one");
    println!("tuple: {} is {}", point.0, point.1);
}

fn receivers() {
    let mut v = Vertex::new(3.0, 4.0);
    v.scale(10.0);
    println!("after scale(10): {v}");

    let moved = v.translated(1.0, 1.0);
    println!("translated copy: {moved}, original still {v} (Vertex is Copy)");

    let r = &mut v;
    r.scale(0.5); // auto-deref: no explicit (*r).scale
    println!("scaled through a reference: {v}");
}

fn comparison() {
    let a = Vertex::new(1.0, 2.0);
    let b = Vertex { x: 1.0, ..a };
    println!("a == b: {}", a == b);
}

pub fn run() {
    println!("=== Structs ===\n");

    println!("--- Literals ---");
    literals_and_defaults();

    println!("\n--- Method receivers ---");
    receivers();

    println!("\n--- Equality ---");
    comparison();

    println!("\n=== Key Points ===");
    println!("1. &self reads, &mut self mutates, self consumes");
    println!("2. Method calls auto-reference and auto-dereference");
    println!("3. Derive Debug/Clone/PartialEq instead of writing them by hand");
}
