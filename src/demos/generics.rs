//! Generics: type parameters with trait bounds, generic data structures,
//! and constraints spelled out with `where`.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::ops::Add;

/// Sums any values that can be added and start from a default.
pub fn sum<T>(values: &[T]) -> T
where
    T: Copy + Default + Add<Output = T>,
{
    values.iter().copied().fold(T::default(), |acc, v| acc + v)
}

pub fn map_keys<K: Clone + Ord, V>(m: &HashMap<K, V>) -> Vec<K> {
    let mut keys: Vec<K> = m.keys().cloned().collect();
    keys.sort();
    keys
}

pub fn index_of<T: PartialEq>(haystack: &[T], needle: &T) -> Option<usize> {
    haystack.iter().position(|x| x == needle)
}

pub fn frequencies<T: Eq + Hash + Clone>(items: &[T]) -> HashMap<T, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item.clone()).or_insert(0) += 1;
    }
    counts
}

/// A LIFO stack over any element type.
#[derive(Debug, Default)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// Methods only available when T can be displayed.
impl<T: Display> Stack<T> {
    pub fn render(&self) -> String {
        let parts: Vec<String> = self.items.iter().map(|i| i.to_string()).collect();
        format!("[{}>", parts.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pair<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pair<A, B> {
    fn swap(self) -> Pair<B, A> {
        Pair {
            first: self.second,
            second: self.first,
        }
    }
}

pub fn run() {
    println!("=== Generics ===\n");

    println!("--- Generic functions ---");
    println!("sum of ints   = {}", sum(&[1, 2, 3, 4]));
    println!("sum of floats = {:.2}", sum(&[0.5, 1.25, 2.0]));
    println!("index_of(\"c\") = {:?}", index_of(&["a", "b", "c"], &"c"));

    let mut ages = HashMap::new();
    ages.insert("zed", 30);
    ages.insert("amy", 25);
    println!("sorted keys   = {:?}", map_keys(&ages));

    let freq = frequencies(&['a', 'b', 'a', 'c', 'a']);
    let mut freq: Vec<_> = freq.into_iter().collect();
    freq.sort();
    println!("frequencies   = {:?}", freq);

    println!("\n--- Generic types ---");
    let mut stack = Stack::new();
    for n in 1..=4 {
        stack.push(n * 10);
    }
    println!("stack {} (len {})", stack.render(), stack.len());
    println!("pop -> {:?}, peek -> {:?}", stack.pop(), stack.peek());

    let mut words: Stack<String> = Stack::new();
    words.push("generic".into());
    println!("Stack<String>: {}", words.render());

    let pair = Pair { first: 1, second: "one" };
    println!("{:?} swapped is {:?}", pair, pair.swap());

    println!("\n=== Key Points ===");
    println!("1. Bounds state what a type parameter must support");
    println!("2. Generic code is monomorphised: no runtime cost");
    println!("3. impl blocks can add methods only for some T");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_over_types() {
        assert_eq!(sum(&[1, 2, 3]), 6);
        assert_eq!(sum::<i64>(&[]), 0);
        assert!((sum(&[0.1f64, 0.2]) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut stack = Stack::new();
        assert!(stack.is_empty());
        stack.push('a');
        stack.push('b');
        assert_eq!(stack.peek(), Some(&'b'));
        assert_eq!(stack.pop(), Some('b'));
        assert_eq!(stack.pop(), Some('a'));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_frequencies_and_index() {
        let counts = frequencies(&["x", "y", "x"]);
        assert_eq!(counts["x"], 2);
        assert_eq!(index_of(&[3, 4, 5], &5), Some(2));
        assert_eq!(index_of(&[3, 4, 5], &9), None);
    }
}
