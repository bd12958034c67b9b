//! Closures: capturing by reference, by mutable reference and by move;
//! returning closures; the Fn / FnMut / FnOnce family.

fn counter() -> impl FnMut() -> u32 {
    let mut count = 0;
    move || {
        count += 1;
        count
    }
}

fn fibonacci() -> impl FnMut() -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    move || {
        let next = a;
        (a, b) = (b, a + b);
        next
    }
}

fn apply_twice<F: Fn(i32) -> i32>(f: F, x: i32) -> i32 {
    f(f(x))
}

fn make_adder(n: i32) -> Box<dyn Fn(i32) -> i32> {
    Box::new(move |x| x + n)
}

fn captures() {
    let greeting = String::from("hello");
    let borrow = || println!("borrowed: {greeting}");
    borrow();
    println!("still usable outside: {greeting}");

    let mut total = 0;
    let mut add = |n: i32| total += n;
    add(5);
    add(7);
    println!("mutably captured total = {total}");

    let owned = String::from("moved in");
    let consume = move || owned.len();
    println!("move closure sees {} bytes", consume());
}

fn once() {
    let resource = vec![1, 2, 3];
    let take = move || resource; // returns the Vec: FnOnce
    let got = take();
    println!("FnOnce handed back {:?}", got);
}

pub fn run() {
    println!("=== Closures ===\n");

    println!("--- Captures ---");
    captures();

    println!("\n--- Stateful closures ---");
    let mut next = counter();
    println!("counter: {} {} {}", next(), next(), next());
    let mut fib = fibonacci();
    let first: Vec<u64> = (0..10).map(|_| fib()).collect();
    println!("fibonacci: {:?}", first);

    println!("\n--- Higher-order functions ---");
    println!("apply_twice(|x| x * 3, 2) = {}", apply_twice(|x| x * 3, 2));
    let adders: Vec<Box<dyn Fn(i32) -> i32>> = (1..=3).map(make_adder).collect();
    let results: Vec<i32> = adders.iter().map(|f| f(10)).collect();
    println!("adders applied to 10: {:?}", results);

    println!("\n--- FnOnce ---");
    once();

    println!("\n=== Key Points ===");
    println!("1. Closures capture as little as they need: &, &mut or by value");
    println!("2. `move` forces ownership, required when the closure outlives the scope");
    println!("3. Fn ⊂ FnMut ⊂ FnOnce describe how often a closure may be called");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_independent() {
        let mut a = counter();
        let mut b = counter();
        assert_eq!(a(), 1);
        assert_eq!(a(), 2);
        assert_eq!(b(), 1);
    }

    #[test]
    fn test_fibonacci_sequence() {
        let mut fib = fibonacci();
        let seq: Vec<u64> = (0..8).map(|_| fib()).collect();
        assert_eq!(seq, vec![0, 1, 1, 2, 3, 5, 8, 13]);
    }
}
