//! Slices: views into contiguous data, and `Vec` as the growable backing store.

use itertools::Itertools;

fn growth() {
    let mut values: Vec<i32> = Vec::new();
    println!("len={} cap={}", values.len(), values.capacity());
    for i in 0..10 {
        values.push(i);
        println!("push({i}) -> len={} cap={}", values.len(), values.capacity());
    }

    let mut sized = Vec::with_capacity(16);
    sized.extend_from_slice(&values[..4]);
    println!("with_capacity(16) then 4 elements -> len={} cap={}", sized.len(), sized.capacity());
}

fn views_share_memory() {
    let mut numbers = vec![1, 2, 3, 4, 5, 6];
    {
        let middle = &mut numbers[2..4];
        println!("middle = {:?}", middle);
        middle[0] = 30;
        middle[1] = 40;
    }
    println!("after writing through the view: {:?}", numbers);

    let (left, right) = numbers.split_at_mut(3);
    left[0] += right[0];
    println!("split_at_mut(3) and left[0] += right[0]: {:?}", numbers);
}

fn copy_versus_clone() {
    let src = [9, 8, 7];
    let mut dst = [0; 5];
    dst[..src.len()].copy_from_slice(&src);
    println!("copy_from_slice -> {:?}", dst);

    let owned: Vec<i32> = src.to_vec();
    println!("to_vec -> {:?} (independent allocation)", owned);
}

fn helpers() {
    let words = ["alpha", "beta", "gamma", "delta", "epsilon"];

    for chunk in words.chunks(2) {
        println!("chunk: {:?}", chunk);
    }
    for pair in words.windows(2).take(2) {
        println!("window: {:?}", pair);
    }

    println!("joined: {}", words.iter().join(" | "));
    println!("sorted by len: {:?}", words.iter().sorted_by_key(|w| w.len()).collect::<Vec<_>>());

    let mut numbers = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3];
    numbers.sort_unstable();
    numbers.dedup();
    println!("sorted + dedup: {:?}", numbers);
    println!("binary_search(5) = {:?}", numbers.binary_search(&5));

    numbers.retain(|n| n % 2 == 1);
    println!("odd only: {:?}", numbers);
}

pub fn run() {
    println!("=== Slices ===\n");

    println!("--- Growth ---");
    growth();

    println!("\n--- Views ---");
    views_share_memory();

    println!("\n--- Copy vs clone ---");
    copy_versus_clone();

    println!("\n--- Helpers ---");
    helpers();

    println!("\n=== Key Points ===");
    println!("1. &[T] is a pointer + length into someone else's storage");
    println!("2. Vec<T> owns the buffer and reallocates when capacity runs out");
    println!("3. The borrow checker forbids a view outliving a reallocation");
}
