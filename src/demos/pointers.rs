//! Pointers: references, mutable references, `Box`, `Option` instead of nil,
//! and raw pointers for illustration.

fn references() {
    let mut i = 42;
    let p = &i;
    println!("i = {i}, *p = {}, p = {:p}", *p, p);

    let q = &mut i;
    *q = 21;
    println!("after *q = 21: i = {i}");

    let mut j = 2701;
    let r = &mut j;
    *r /= 37;
    println!("j / 37 through a pointer: {j}");
}

fn modify(value: &mut i32) {
    *value += 100;
}

fn no_modify(mut value: i32) {
    value += 100;
    println!("  inside no_modify: {value}");
}

fn by_reference_vs_value() {
    let mut n = 1;
    no_modify(n);
    println!("after no_modify: n = {n}");
    modify(&mut n);
    println!("after modify(&mut n): n = {n}");
}

#[derive(Debug)]
struct Node {
    value: i32,
    next: Option<Box<Node>>,
}

fn boxes_and_nil() {
    let heap = Box::new(5);
    println!("Box::new(5) = {heap}, lives at {:p}", heap);

    let list = Node {
        value: 1,
        next: Some(Box::new(Node {
            value: 2,
            next: Some(Box::new(Node { value: 3, next: None })),
        })),
    };
    let mut cursor = Some(&list);
    let mut values = Vec::new();
    while let Some(node) = cursor {
        values.push(node.value);
        cursor = node.next.as_deref();
    }
    println!("linked list via Option<Box<Node>>: {:?}", values);

    let missing: Option<&Node> = None;
    match missing {
        Some(node) => println!("value {}", node.value),
        None => println!("no node: Option replaces the nil pointer"),
    }
}

fn raw_pointers() {
    let x = 10;
    let raw = &x as *const i32;
    // Creating a raw pointer is safe; dereferencing it is not.
    let read = unsafe { *raw };
    println!("raw pointer {:p} reads {read}", raw);
    println!("null check: {}", std::ptr::null::<i32>().is_null());
}

pub fn run() {
    println!("=== Pointers ===\n");

    println!("--- References ---");
    references();

    println!("\n--- Passing by value vs by reference ---");
    by_reference_vs_value();

    println!("\n--- Box and Option ---");
    boxes_and_nil();

    println!("\n--- Raw pointers ---");
    raw_pointers();

    println!("\n=== Key Points ===");
    println!("1. &T shares, &mut T is exclusive; both are always valid");
    println!("2. There is no pointer arithmetic on references");
    println!("3. Option<Box<T>> is the nullable owning pointer");
}
