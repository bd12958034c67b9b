//! Panics and recovery: `catch_unwind` at a boundary, panic payloads, and
//! why `Result` is the normal path.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::Arc;
use std::thread;

fn risky_division(a: i32, b: i32) -> i32 {
    if b == 0 {
        panic!("division by zero: {a} / {b}");
    }
    a / b
}

/// The message carried by a panic payload.
pub fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Runs `f`, turning a panic into an `Err` with the panic message.
pub fn recover<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| payload_message(&*payload))
}

type Hook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Keeps the panic hook quiet for panics whose message contains one of
/// `expected`. Every other panic still reaches the previous hook, which is
/// reinstalled on drop.
pub struct ExpectedPanics {
    previous: Option<Arc<Hook>>,
}

impl ExpectedPanics {
    pub fn new(expected: &'static [&'static str]) -> Self {
        let previous: Arc<Hook> = Arc::new(panic::take_hook());
        let fallback = Arc::clone(&previous);
        panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
            let message = payload_message(info.payload());
            if !expected.iter().any(|e| message.contains(e)) {
                (*fallback)(info);
            }
        }));
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for ExpectedPanics {
    fn drop(&mut self) {
        // The hook cannot be swapped from a panicking thread.
        if thread::panicking() {
            return;
        }
        let Some(previous) = self.previous.take() else {
            return;
        };
        // Dropping the filtering hook releases its clone of `previous`.
        drop(panic::take_hook());
        match Arc::try_unwrap(previous) {
            Ok(hook) => panic::set_hook(hook),
            Err(shared) => panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| (*shared)(info))),
        }
    }
}

fn checked_alternative(a: i32, b: i32) -> Option<i32> {
    a.checked_div(b)
}

pub fn run() {
    println!("=== Panic and Recover ===\n");

    let quiet = ExpectedPanics::new(&["division by zero", "index out of bounds"]);

    println!("--- Recovering at a boundary ---");
    for (a, b) in [(10, 2), (1, 0)] {
        match recover(|| risky_division(a, b)) {
            Ok(v) => println!("  {a} / {b} = {v}"),
            Err(msg) => println!("  recovered from panic: {msg}"),
        }
    }

    println!("\n--- Index out of bounds ---");
    let data = vec![1, 2, 3];
    let idx = data.len() + 2;
    match recover(|| data[idx]) {
        Ok(v) => println!("  got {v}"),
        Err(msg) => println!("  recovered: {msg}"),
    }

    drop(quiet);

    println!("\n--- Prefer checked operations ---");
    println!("  10.checked_div(0) = {:?}", checked_alternative(10, 0));
    println!("  data.get({idx})    = {:?}", data.get(idx));

    println!("\n=== Key Points ===");
    println!("1. Panics are for bugs, Result is for expected failures");
    println!("2. catch_unwind belongs at thread or request boundaries");
    println!("3. With panic = \"abort\" nothing can be recovered");
}
