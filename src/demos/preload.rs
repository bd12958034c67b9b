//! Loading a has-many relation: lazy loading (one query per parent) versus
//! preloading (one `IN` query), plus a conditional preload.

use crate::orm::{seed, Author, Store, StoreError};

fn show(authors: &[Author]) {
    for author in authors {
        let titles: Vec<String> = author
            .books
            .iter()
            .map(|b| format!("{} ({})", b.title, b.year))
            .collect();
        println!("  {}: {}", author.name, titles.join(", "));
    }
}

fn compare() -> Result<(), StoreError> {
    let store = Store::open_in_memory()?;
    seed(&store)?;

    println!("--- Lazy loading (N+1) ---");
    store.reset_statements();
    let mut authors = store.authors()?;
    store.load_books(&mut authors)?;
    show(&authors);
    println!("  statements: {} (1 for authors + {} for books)", store.statements(), authors.len());

    println!("\n--- Preload ---");
    store.reset_statements();
    let authors = store.authors_with_books()?;
    show(&authors);
    println!("  statements: {}", store.statements());

    println!("\n--- Conditional preload (books since 1980) ---");
    store.reset_statements();
    let recent = store.authors_with_books_since(1980)?;
    show(&recent);
    println!("  statements: {}", store.statements());

    Ok(())
}

pub fn run() {
    println!("=== Preload ===\n");

    if let Err(err) = compare() {
        println!("error: {err}");
        return;
    }

    println!("\n=== Key Points ===");
    println!("1. Loading a relation per row costs N+1 round trips");
    println!("2. Preloading fetches every child row in one IN query");
    println!("3. The statement count stays flat as the number of parents grows");
}
