//! Create, read, update and delete against an in-memory SQLite store,
//! including a transaction and a cascading delete.

use crate::orm::{Store, StoreError};

fn walkthrough() -> Result<(), StoreError> {
    let mut store = Store::open_in_memory()?;

    println!("--- Create ---");
    let author = store.create_author("Ted Chiang")?;
    let book = store.create_book(author.id, "Stories of Your Life", 2002)?;
    println!("  created author #{} {}", author.id, author.name);
    println!("  created book #{} {:?} ({})", book.id, book.title, book.year);

    let other = store.create_author_with_books("N. K. Jemisin", &[("The Fifth Season", 2015), ("The Obelisk Gate", 2016)])?;
    println!("  created {} with {} books in one transaction", other.name, other.books.len());

    println!("\n--- Read ---");
    let found = store.find_author(author.id)?;
    println!("  find_author({}) -> {}", author.id, found.name);
    for a in store.authors()? {
        println!("  author #{} {}", a.id, a.name);
    }

    println!("\n--- Update ---");
    store.rename_book(book.id, "Stories of Your Life and Others")?;
    for b in store.books_by_author(author.id)? {
        println!("  renamed: {:?}", b.title);
    }

    println!("\n--- Delete ---");
    println!("  books before: {}", store.book_count()?);
    store.delete_author(other.id)?;
    println!("  deleted {}; books after cascade: {}", other.name, store.book_count()?);

    println!("\n--- Errors ---");
    match store.find_author(other.id) {
        Err(err @ StoreError::NotFound { .. }) => println!("  {err}"),
        Ok(a) => println!("  unexpectedly found {}", a.name),
        Err(err) => return Err(err),
    }
    match store.create_author("Ted Chiang") {
        Err(StoreError::Sqlite(err)) => println!("  duplicate name rejected: {err}"),
        Ok(_) => println!("  duplicate name accepted"),
        Err(err) => return Err(err),
    }

    println!("\n  {} statements executed", store.statements());
    Ok(())
}

pub fn run() {
    println!("=== Crud ===\n");

    if let Err(err) = walkthrough() {
        println!("error: {err}");
        return;
    }

    println!("\n=== Key Points ===");
    println!("1. Prepared parameters (?1, ?2) keep values out of the SQL text");
    println!("2. A transaction commits every insert or none");
    println!("3. Missing rows are a typed error, not a panic");
}
