//! Struct embedding, Rust style: composition plus `Deref` for field and
//! method promotion, and trait default methods for shared behaviour.

use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone)]
struct Person {
    name: String,
    age: u32,
}

impl Person {
    fn greet(&self) -> String {
        format!("Hi, I'm {}", self.name)
    }

    fn birthday(&mut self) {
        self.age += 1;
    }
}

#[derive(Debug)]
struct Employee {
    person: Person,
    company: String,
}

// Promotion: `employee.name` and `employee.greet()` resolve through Person.
impl Deref for Employee {
    type Target = Person;

    fn deref(&self) -> &Person {
        &self.person
    }
}

impl DerefMut for Employee {
    fn deref_mut(&mut self) -> &mut Person {
        &mut self.person
    }
}

impl Employee {
    // "Overrides" the promoted method; the inner one stays reachable.
    fn greet(&self) -> String {
        format!("{} and I work at {}", self.person.greet(), self.company)
    }
}

trait Describe {
    fn name(&self) -> &str;

    fn describe(&self) -> String {
        format!("<{}>", self.name())
    }
}

struct Logger {
    prefix: &'static str,
}

impl Logger {
    fn log(&self, msg: &str) {
        println!("{} {msg}", self.prefix);
    }
}

struct Service {
    logger: Logger,
    name: String,
}

impl Describe for Service {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Service {
    fn start(&self) {
        self.logger.log(&format!("starting {}", self.describe()));
    }
}

pub fn run() {
    println!("=== Struct Embedding ===\n");

    let mut e = Employee {
        person: Person {
            name: "Grace".into(),
            age: 36,
        },
        company: "Navy".into(),
    };

    println!("--- Promoted fields ---");
    println!("e.name = {}, e.age = {}", e.name, e.age);

    println!("\n--- Promoted and shadowed methods ---");
    println!("e.greet()        = {}", e.greet());
    println!("e.person.greet() = {}", e.person.greet());

    e.birthday(); // DerefMut
    println!("after birthday: age {}", e.age);

    println!("\n--- Behaviour via traits ---");
    let svc = Service {
        logger: Logger { prefix: "[svc]" },
        name: "billing".into(),
    };
    svc.start();

    println!("\n=== Key Points ===");
    println!("1. There is no inheritance; embed a field and delegate");
    println!("2. Deref gives field/method promotion but is not subtyping");
    println!("3. Trait default methods share behaviour across types");
}
