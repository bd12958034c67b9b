//! Channels: unbuffered (rendezvous) and buffered channels, closing by
//! dropping senders, ranging over a receiver, and fan-in.

use std::thread;
use std::time::Duration;

use crossbeam::channel::{bounded, unbounded, Receiver, Sender};

fn sum_into(values: Vec<i32>, out: Sender<i32>) {
    let total = values.iter().sum();
    // The receiver may have gone away; nothing to do then.
    let _ = out.send(total);
}

fn split_sum(values: Vec<i32>) -> (i32, i32) {
    let (tx, rx) = unbounded();
    let (left, right) = values.split_at(values.len() / 2);

    let tx2 = tx.clone();
    let l = left.to_vec();
    let r = right.to_vec();
    let h1 = thread::spawn(move || sum_into(l, tx));
    let h2 = thread::spawn(move || sum_into(r, tx2));

    let x = rx.recv().unwrap_or_default();
    let y = rx.recv().unwrap_or_default();
    let _ = (h1.join(), h2.join());
    (x, y)
}

fn rendezvous() {
    // Capacity 0: every send waits for a matching receive.
    let (tx, rx) = bounded::<&str>(0);
    let handle = thread::spawn(move || {
        for msg in ["ping", "pong", "done"] {
            println!("  sending {msg}");
            if tx.send(msg).is_err() {
                break;
            }
        }
    });
    thread::sleep(Duration::from_millis(20));
    for msg in rx.iter() {
        println!("  received {msg}");
    }
    let _ = handle.join();
}

fn buffered() -> Vec<i32> {
    let (tx, rx) = bounded(2);
    let _ = tx.send(1);
    let _ = tx.send(2);
    println!("  buffer full: try_send(3) -> {:?}", tx.try_send(3).is_err());
    println!("  len = {}, capacity = {:?}", rx.len(), rx.capacity());
    drop(tx);
    let drained: Vec<i32> = rx.iter().collect();
    drained
}

fn fibonacci(n: usize, out: Sender<u64>) {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        if out.send(a).is_err() {
            return;
        }
        (a, b) = (b, a + b);
    }
    // Dropping `out` closes the channel and ends the range loop.
}

fn range_over_channel(n: usize) -> Vec<u64> {
    let (tx, rx) = bounded(4);
    let producer = thread::spawn(move || fibonacci(n, tx));
    let seen: Vec<u64> = rx.iter().collect();
    let _ = producer.join();
    seen
}

fn fan_in(inputs: Vec<Receiver<String>>) -> Receiver<String> {
    let (tx, rx) = unbounded();
    for input in inputs {
        let tx = tx.clone();
        // Each forwarder exits once its input closes, dropping its Sender.
        thread::spawn(move || {
            for msg in input.iter() {
                if tx.send(msg).is_err() {
                    break;
                }
            }
        });
    }
    drop(tx);
    rx
}

fn multiplex() -> Vec<String> {
    let mut inputs = Vec::new();
    let mut producers = Vec::new();
    for name in ["alpha", "beta"] {
        let (tx, rx) = unbounded();
        inputs.push(rx);
        producers.push(thread::spawn(move || {
            for i in 0..2 {
                let _ = tx.send(format!("{name}-{i}"));
            }
        }));
    }
    let merged = fan_in(inputs);
    for p in producers {
        let _ = p.join();
    }
    // The merged channel closes when every forwarder is done.
    let mut all: Vec<String> = merged.iter().collect();
    all.sort();
    all
}

pub fn run() {
    println!("=== Channels ===\n");

    println!("--- Summing in two threads ---");
    let (x, y) = split_sum(vec![7, 2, 8, -9, 4, 0]);
    println!("  partial sums {x} and {y}, total {}", x + y);

    println!("\n--- Unbuffered ---");
    rendezvous();

    println!("\n--- Buffered ---");
    println!("  drained after close: {:?}", buffered());

    println!("\n--- Range until closed ---");
    println!("  {:?}", range_over_channel(10));

    println!("\n--- Fan-in ---");
    println!("  merged: {:?}", multiplex());

    println!("\n=== Key Points ===");
    println!("1. A channel closes when every Sender is dropped");
    println!("2. bounded(0) is a rendezvous; bounded(n) buffers n messages");
    println!("3. Iterating a Receiver stops once the channel is closed and empty");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sum_halves() {
        let (x, y) = split_sum(vec![7, 2, 8, -9, 4, 0]);
        // Arrival order is not fixed.
        let mut parts = [x, y];
        parts.sort();
        assert_eq!(parts, [-5, 17]);
    }

    #[test]
    fn test_buffered_drains_after_close() {
        assert_eq!(buffered(), vec![1, 2]);
    }

    #[test]
    fn test_range_stops_when_sender_dropped() {
        assert_eq!(range_over_channel(10), vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
        assert!(range_over_channel(0).is_empty());
    }

    #[test]
    fn test_fan_in_delivers_everything_then_closes() {
        assert_eq!(multiplex(), vec!["alpha-0", "alpha-1", "beta-0", "beta-1"]);
    }

    #[test]
    fn test_fan_in_with_no_inputs_is_closed() {
        let merged = fan_in(Vec::new());
        assert!(merged.recv().is_err());
    }
}
