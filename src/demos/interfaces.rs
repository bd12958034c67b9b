//! Interfaces are traits: static and dynamic dispatch, type switches via
//! enums or `Any`, and the empty interface.

use std::any::Any;
use std::f64::consts::PI;
use std::fmt;

trait Shape: fmt::Debug {
    fn area(&self) -> f64;
    fn perimeter(&self) -> f64;

    fn name(&self) -> &'static str {
        "shape"
    }
}

#[derive(Debug)]
struct Rect {
    w: f64,
    h: f64,
}

#[derive(Debug)]
struct Circle {
    r: f64,
}

impl Shape for Rect {
    fn area(&self) -> f64 {
        self.w * self.h
    }
    fn perimeter(&self) -> f64 {
        2.0 * (self.w + self.h)
    }
    fn name(&self) -> &'static str {
        "rect"
    }
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        PI * self.r * self.r
    }
    fn perimeter(&self) -> f64 {
        2.0 * PI * self.r
    }
    fn name(&self) -> &'static str {
        "circle"
    }
}

// Static dispatch: monomorphised per concrete type.
fn describe_static<S: Shape>(shape: &S) -> String {
    format!("{} area={:.2}", shape.name(), shape.area())
}

// Dynamic dispatch: one function, vtable lookup at runtime.
fn total_area(shapes: &[Box<dyn Shape>]) -> f64 {
    shapes.iter().map(|s| s.area()).sum()
}

// Satisfying a standard trait, like implementing Stringer.
struct Ip([u8; 4]);

impl fmt::Display for Ip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

fn type_switch(value: &dyn Any) -> String {
    if let Some(i) = value.downcast_ref::<i32>() {
        format!("i32 twice is {}", i * 2)
    } else if let Some(s) = value.downcast_ref::<String>() {
        format!("String of {} bytes", s.len())
    } else if let Some(s) = value.downcast_ref::<&str>() {
        format!("&str {s:?}")
    } else {
        "something else".to_string()
    }
}

pub fn run() {
    println!("=== Interfaces ===\n");

    println!("--- Static dispatch ---");
    println!("{}", describe_static(&Rect { w: 3.0, h: 4.0 }));
    println!("{}", describe_static(&Circle { r: 1.0 }));

    println!("\n--- Dynamic dispatch ---");
    let shapes: Vec<Box<dyn Shape>> = vec![Box::new(Rect { w: 2.0, h: 5.0 }), Box::new(Circle { r: 2.0 })];
    for s in &shapes {
        println!("{:<6} area={:>6.2} perimeter={:>6.2}  {:?}", s.name(), s.area(), s.perimeter(), s);
    }
    println!("total area = {:.2}", total_area(&shapes));

    println!("\n--- Standard traits ---");
    println!("loopback is {}", Ip([127, 0, 0, 1]));

    println!("\n--- Type switch over dyn Any ---");
    let values: Vec<Box<dyn Any>> = vec![Box::new(21i32), Box::new(String::from("hello")), Box::new("hi"), Box::new(1.5f32)];
    for v in &values {
        println!("  {}", type_switch(v.as_ref()));
    }

    println!("\n=== Key Points ===");
    println!("1. Traits are implemented explicitly, not structurally");
    println!("2. Generics give static dispatch, dyn Trait gives dynamic dispatch");
    println!("3. Prefer an enum over dyn Any when the set of types is closed");
}
