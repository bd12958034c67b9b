//! One module per demo. Each exposes `pub fn run()`, registered in
//! [`crate::registry::DEMOS`].

// Language
pub mod arrays;
pub mod closures;
pub mod conversion;
pub mod defer;
pub mod embedding;
pub mod errors;
pub mod generics;
pub mod interfaces;
pub mod json;
pub mod maps;
pub mod panic_recover;
pub mod pointers;
pub mod slices;
pub mod strings;
pub mod structs;

// Concurrency
pub mod async_tasks;
pub mod channels;
pub mod goroutine;
pub mod mutex;
pub mod select;
pub mod sync_map;

// Web
pub mod jwt_auth;
pub mod middleware;
pub mod routes;

// Data layer
pub mod crud;
pub mod preload;
