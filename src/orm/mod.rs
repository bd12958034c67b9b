//! The data layer behind the `Crud` and `Preload` demos.

pub mod store;

pub use store::{seed, Author, Book, Store, StoreError};
