//! Authors and their books in an in-memory SQLite database.
//!
//! A deliberately thin model layer: plain structs, hand-written SQL, and a
//! statement counter so the demos can show how many round trips each
//! loading strategy costs.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i64,
    pub name: String,
    /// Empty until loaded with [`Store::load_books`] or a preloading query.
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub year: i32,
}

impl Book {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Book {
            id: row.get(0)?,
            author_id: row.get(1)?,
            title: row.get(2)?,
            year: row.get(3)?,
        })
    }
}

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS authors (
        id   INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS books (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        author_id INTEGER NOT NULL REFERENCES authors(id) ON DELETE CASCADE,
        title     TEXT NOT NULL,
        year      INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_books_author ON books(author_id);
";

pub struct Store {
    conn: Connection,
    statements: Cell<usize>,
    last_sql: RefCell<String>,
}

impl Store {
    /// Opens a fresh in-memory database with the schema applied. The
    /// database disappears when the store is dropped.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            statements: Cell::new(0),
            last_sql: RefCell::new(String::new()),
        })
    }

    /// Number of statements executed since the last reset.
    pub fn statements(&self) -> usize {
        self.statements.get()
    }

    pub fn reset_statements(&self) {
        self.statements.set(0);
    }

    /// Text of the most recent counted statement.
    pub fn last_statement(&self) -> String {
        self.last_sql.borrow().clone()
    }

    fn count(&self, sql: &str) {
        self.statements.set(self.statements.get() + 1);
        *self.last_sql.borrow_mut() = sql.to_owned();
        debug!(n = self.statements.get(), sql, "statement");
    }

    pub fn create_author(&self, name: &str) -> Result<Author, StoreError> {
        let sql = "INSERT INTO authors (name) VALUES (?1)";
        self.count(sql);
        self.conn.execute(sql, params![name])?;
        Ok(Author {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            books: Vec::new(),
        })
    }

    pub fn create_book(&self, author_id: i64, title: &str, year: i32) -> Result<Book, StoreError> {
        let sql = "INSERT INTO books (author_id, title, year) VALUES (?1, ?2, ?3)";
        self.count(sql);
        self.conn.execute(sql, params![author_id, title, year])?;
        Ok(Book {
            id: self.conn.last_insert_rowid(),
            author_id,
            title: title.to_string(),
            year,
        })
    }

    /// Inserts an author and all books in one transaction.
    pub fn create_author_with_books(
        &mut self,
        name: &str,
        books: &[(&str, i32)],
    ) -> Result<Author, StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("INSERT INTO authors (name) VALUES (?1)", params![name])?;
        let author_id = tx.last_insert_rowid();
        let mut created = Vec::with_capacity(books.len());
        {
            let mut stmt = tx.prepare("INSERT INTO books (author_id, title, year) VALUES (?1, ?2, ?3)")?;
            for (title, year) in books {
                stmt.execute(params![author_id, title, year])?;
                created.push(Book {
                    id: tx.last_insert_rowid(),
                    author_id,
                    title: title.to_string(),
                    year: *year,
                });
            }
        }
        tx.commit()?;
        self.statements.set(self.statements.get() + 1 + books.len());
        Ok(Author {
            id: author_id,
            name: name.to_string(),
            books: created,
        })
    }

    /// Finds one author without their books.
    pub fn find_author(&self, id: i64) -> Result<Author, StoreError> {
        let sql = "SELECT id, name FROM authors WHERE id = ?1";
        self.count(sql);
        self.conn
            .query_row(sql, params![id], |row| {
                Ok(Author {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    books: Vec::new(),
                })
            })
            .optional()?
            .ok_or(StoreError::NotFound { entity: "author", id })
    }

    /// All authors ordered by name, books not loaded.
    pub fn authors(&self) -> Result<Vec<Author>, StoreError> {
        let sql = "SELECT id, name FROM authors ORDER BY name";
        self.count(sql);
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(Author {
                id: row.get(0)?,
                name: row.get(1)?,
                books: Vec::new(),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn books_by_author(&self, author_id: i64) -> Result<Vec<Book>, StoreError> {
        let sql = "SELECT id, author_id, title, year FROM books WHERE author_id = ?1 ORDER BY year, id";
        self.count(sql);
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params![author_id], Book::from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Lazy loading: one extra query per author (the N+1 pattern).
    pub fn load_books(&self, authors: &mut [Author]) -> Result<(), StoreError> {
        for author in authors.iter_mut() {
            author.books = self.books_by_author(author.id)?;
        }
        Ok(())
    }

    /// Preloading: all books for all given authors in a single `IN` query.
    pub fn preload_books(&self, authors: &mut [Author]) -> Result<(), StoreError> {
        self.preload_books_where(authors, None)
    }

    fn preload_books_where(&self, authors: &mut [Author], min_year: Option<i32>) -> Result<(), StoreError> {
        if authors.is_empty() {
            return Ok(());
        }
        let placeholders = vec!["?"; authors.len()].join(", ");
        let year_filter = if min_year.is_some() { " AND year >= ?" } else { "" };
        let sql = format!(
            "SELECT id, author_id, title, year FROM books \
             WHERE author_id IN ({placeholders}){year_filter} ORDER BY year, id"
        );
        self.count(&sql);

        let bound = authors.iter().map(|a| a.id).chain(min_year.map(i64::from));
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bound), Book::from_row)?;

        let mut by_author: HashMap<i64, Vec<Book>> = HashMap::new();
        for book in rows {
            let book = book?;
            by_author.entry(book.author_id).or_default().push(book);
        }
        for author in authors.iter_mut() {
            author.books = by_author.remove(&author.id).unwrap_or_default();
        }
        Ok(())
    }

    /// `authors()` followed by `preload_books()`: always two statements.
    pub fn authors_with_books(&self) -> Result<Vec<Author>, StoreError> {
        let mut authors = self.authors()?;
        self.preload_books(&mut authors)?;
        Ok(authors)
    }

    /// Authors with only books from `min_year` on preloaded. The filter runs
    /// in SQL; authors without matching books keep an empty list.
    pub fn authors_with_books_since(&self, min_year: i32) -> Result<Vec<Author>, StoreError> {
        let mut authors = self.authors()?;
        self.preload_books_where(&mut authors, Some(min_year))?;
        Ok(authors)
    }

    pub fn rename_book(&self, id: i64, title: &str) -> Result<(), StoreError> {
        let sql = "UPDATE books SET title = ?1 WHERE id = ?2";
        self.count(sql);
        match self.conn.execute(sql, params![title, id])? {
            0 => Err(StoreError::NotFound { entity: "book", id }),
            _ => Ok(()),
        }
    }

    /// Deletes an author; their books go with them (`ON DELETE CASCADE`).
    pub fn delete_author(&self, id: i64) -> Result<(), StoreError> {
        let sql = "DELETE FROM authors WHERE id = ?1";
        self.count(sql);
        match self.conn.execute(sql, params![id])? {
            0 => Err(StoreError::NotFound { entity: "author", id }),
            _ => Ok(()),
        }
    }

    pub fn book_count(&self) -> Result<i64, StoreError> {
        let sql = "SELECT COUNT(*) FROM books";
        self.count(sql);
        Ok(self.conn.query_row(sql, [], |row| row.get(0))?)
    }
}

/// Authors and books used by the data-layer demos.
pub fn seed(store: &Store) -> Result<(), StoreError> {
    let catalogue: [(&str, &[(&str, i32)]); 3] = [
        (
            "Ursula K. Le Guin",
            &[("A Wizard of Earthsea", 1968), ("The Dispossessed", 1974)],
        ),
        (
            "Octavia E. Butler",
            &[("Kindred", 1979), ("Parable of the Sower", 1993), ("Fledgling", 2005)],
        ),
        ("Iain M. Banks", &[("Consider Phlebas", 1987)]),
    ];
    for (name, books) in catalogue {
        let author = store.create_author(name)?;
        for (title, year) in books {
            store.create_book(author.id, title, *year)?;
        }
    }
    Ok(())
}
