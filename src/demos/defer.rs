//! Deferred work runs in `Drop`: guards run in reverse order of creation,
//! on normal return, early return and unwinding alike.

use std::fs;
use std::io::{self, Write};

use tempfile::NamedTempFile;

use super::panic_recover::ExpectedPanics;

/// Runs a closure when dropped.
struct Defer<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> Defer<F> {
    fn new(action: F) -> Self {
        Self { action: Some(action) }
    }
}

impl<F: FnOnce()> Drop for Defer<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

fn lifo_order() {
    let _first = Defer::new(|| println!("  deferred 1 (runs last)"));
    let _second = Defer::new(|| println!("  deferred 2"));
    let _third = Defer::new(|| println!("  deferred 3 (runs first)"));
    println!("  function body done");
}

fn early_return(fail: bool) -> Result<&'static str, &'static str> {
    let _cleanup = Defer::new(move || println!("  cleanup runs (fail = {fail})"));
    if fail {
        return Err("bailed out early");
    }
    Ok("finished normally")
}

fn temp_file_cleanup() -> io::Result<()> {
    let path;
    {
        let mut file = NamedTempFile::new()?;
        path = file.path().to_path_buf();
        writeln!(file, "scratch data")?;
        let contents = fs::read_to_string(&path)?;
        println!("  wrote {} bytes to a temp file", contents.len());
        println!("  exists inside scope: {}", path.exists());
    } // NamedTempFile::drop removes the file here.
    println!("  exists after scope:  {}", path.exists());
    Ok(())
}

fn during_panic() {
    let result = std::panic::catch_unwind(|| {
        let _guard = Defer::new(|| println!("  guard ran while unwinding"));
        panic!("boom");
    });
    println!("  panic contained: {}", result.is_err());
}

pub fn run() {
    println!("=== Defer ===\n");

    println!("--- LIFO order ---");
    lifo_order();

    println!("\n--- Early return ---");
    println!("  -> {:?}", early_return(false));
    println!("  -> {:?}", early_return(true));

    println!("\n--- Releasing resources ---");
    if let Err(err) = temp_file_cleanup() {
        println!("error: {err}");
    }

    println!("\n--- Unwinding ---");
    {
        let _quiet = ExpectedPanics::new(&["boom"]);
        during_panic();
    }

    println!("\n=== Key Points ===");
    println!("1. Drop is the destructor; it runs when the owner goes out of scope");
    println!("2. Locals drop in reverse declaration order");
    println!("3. Files, locks and temp dirs release themselves the same way");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_guards_run_in_reverse_order() {
        let log = RefCell::new(Vec::new());
        {
            let _a = Defer::new(|| log.borrow_mut().push("a"));
            let _b = Defer::new(|| log.borrow_mut().push("b"));
        }
        assert_eq!(*log.borrow(), vec!["b", "a"]);
    }

    #[test]
    fn test_guard_runs_on_early_return() {
        assert_eq!(early_return(true), Err("bailed out early"));
        assert_eq!(early_return(false), Ok("finished normally"));
    }
}
