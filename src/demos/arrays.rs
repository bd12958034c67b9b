//! Arrays: fixed length, part of the type, copied by value.

fn fixed_size_arrays() {
    let mut primes: [i32; 5] = [2, 3, 5, 7, 11];
    println!("primes        = {:?} (len {})", primes, primes.len());

    primes[4] = 13;
    println!("after primes[4] = 13 -> {:?}", primes);

    // Zero values: every element gets the default.
    let zeros = [0u8; 4];
    println!("[0u8; 4]      = {:?}", zeros);

    let names = ["ada", "grace", "linus"];
    for (i, name) in names.iter().enumerate() {
        println!("  names[{i}] = {name}");
    }
}

fn arrays_are_values() {
    let original = [1, 2, 3];
    let mut copy = original; // [i32; 3] is Copy
    copy[0] = 100;

    println!("original = {:?}", original);
    println!("copy     = {:?}", copy);

    // Passing by value copies, passing by reference does not.
    fn double_in_place(values: &mut [i32; 3]) {
        for v in values.iter_mut() {
            *v *= 2;
        }
    }
    let mut doubled = original;
    double_in_place(&mut doubled);
    println!("doubled through &mut = {:?}", doubled);

    println!("arrays compare by value: {}", original == [1, 2, 3]);
}

fn multi_dimensional() {
    let mut grid = [[0; 3]; 3];
    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            *cell = row * 3 + col;
        }
    }
    for row in &grid {
        println!("  {:?}", row);
    }

    let diagonal: usize = (0..3).map(|i| grid[i][i]).sum();
    println!("sum of diagonal = {diagonal}");
}

fn bounds_checking() {
    let data = [10, 20, 30];
    let index = data.len() + 1;
    match data.get(index) {
        Some(v) => println!("data[{index}] = {v}"),
        None => println!("data.get({index}) = None (indexing with [] would panic)"),
    }
}

pub fn run() {
    println!("=== Arrays ===\n");

    println!("--- Fixed size ---");
    fixed_size_arrays();

    println!("\n--- Value semantics ---");
    arrays_are_values();

    println!("\n--- Two dimensions ---");
    multi_dimensional();

    println!("\n--- Bounds ---");
    bounds_checking();

    println!("\n=== Key Points ===");
    println!("1. The length is part of the type: [i32; 3] and [i32; 4] differ");
    println!("2. Arrays of Copy types are copied on assignment");
    println!("3. Out-of-range indexing panics; .get() returns Option");
}
