//! The demo table.
//!
//! Names and routines are fixed at build time. `DEMOS` is checked by a
//! `const` assertion, so a duplicate or malformed name is a compile error.

use std::collections::BTreeMap;

use lazy_static::lazy_static;

use crate::demos;

/// A demo routine: no arguments, no return value, output on stdout.
pub type Demo = fn();

pub const DEMOS: &[(&str, Demo)] = &[
    // Language
    ("Arrays", demos::arrays::run),
    ("Slices", demos::slices::run),
    ("Maps", demos::maps::run),
    ("Structs", demos::structs::run),
    ("StructEmbedding", demos::embedding::run),
    ("Interfaces", demos::interfaces::run),
    ("Pointers", demos::pointers::run),
    ("TypeConversion", demos::conversion::run),
    ("Closures", demos::closures::run),
    ("Defer", demos::defer::run),
    ("Errors", demos::errors::run),
    ("PanicRecover", demos::panic_recover::run),
    ("Generics", demos::generics::run),
    ("Strings", demos::strings::run),
    ("JSON", demos::json::run),
    // Concurrency
    ("Goroutine", demos::goroutine::run),
    ("Channels", demos::channels::run),
    ("Select", demos::select::run),
    ("Mutex", demos::mutex::run),
    ("SyncMap", demos::sync_map::run),
    ("AsyncTasks", demos::async_tasks::run),
    // Web
    ("Routes", demos::routes::run),
    ("Middleware", demos::middleware::run),
    ("JWTAuth", demos::jwt_auth::run),
    // Data layer
    ("Crud", demos::crud::run),
    ("Preload", demos::preload::run),
];

const _: () = assert!(
    table_is_well_formed(DEMOS),
    "demo names must be unique, non-empty and free of whitespace"
);

const fn same_name(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            return false;
        }
        i += 1;
    }
    true
}

/// True when every name is valid and no name appears twice.
pub const fn table_is_well_formed(table: &[(&str, Demo)]) -> bool {
    let mut i = 0;
    while i < table.len() {
        if !valid_name(table[i].0) {
            return false;
        }
        let mut j = i + 1;
        while j < table.len() {
            if same_name(table[i].0, table[j].0) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// Immutable name -> routine map. Iterates in alphabetical order.
#[derive(Debug, Clone)]
pub struct Registry {
    demos: BTreeMap<&'static str, Demo>,
}

impl Registry {
    /// Builds a registry from a static table.
    ///
    /// # Panics
    ///
    /// Panics if the table has a duplicate, empty or whitespace-containing
    /// name. The global table is verified at compile time instead.
    pub fn from_table(table: &[(&'static str, Demo)]) -> Self {
        assert!(
            table_is_well_formed(table),
            "demo names must be unique, non-empty and free of whitespace"
        );
        Self {
            demos: table.iter().copied().collect(),
        }
    }

    /// Case-sensitive lookup. `None` means "not registered".
    pub fn lookup(&self, name: &str) -> Option<Demo> {
        self.demos.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.demos.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }
}

lazy_static! {
    static ref GLOBAL: Registry = Registry::from_table(DEMOS);
}

/// The process-wide registry built from [`DEMOS`].
pub fn global() -> &'static Registry {
    &GLOBAL
}
