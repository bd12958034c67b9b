//! Async tasks on a tokio runtime: spawn, join_all, timeouts, and an mpsc
//! pipeline.

use std::time::Duration;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

async fn fetch(id: u64) -> String {
    sleep(Duration::from_millis(10 * (4 - id))).await;
    format!("result-{id}")
}

async fn spawned() {
    let handles: Vec<_> = (1..=3).map(|id| tokio::spawn(fetch(id))).collect();
    // join_all keeps input order even though tasks finish in reverse.
    for result in join_all(handles).await {
        match result {
            Ok(value) => println!("  {value}"),
            Err(err) => println!("  task failed: {err}"),
        }
    }
}

async fn timeouts() {
    match timeout(Duration::from_millis(20), sleep(Duration::from_millis(200))).await {
        Ok(()) => println!("  finished in time"),
        Err(_) => println!("  timed out after 20ms"),
    }
    match timeout(Duration::from_millis(200), fetch(3)).await {
        Ok(value) => println!("  got {value} before the deadline"),
        Err(_) => println!("  timed out"),
    }
}

async fn pipeline() -> Vec<u64> {
    let (tx, mut rx) = mpsc::channel(4);
    let producer = tokio::spawn(async move {
        for n in 1..=5u64 {
            if tx.send(n).await.is_err() {
                break;
            }
        }
    });

    let mut squares = Vec::new();
    while let Some(n) = rx.recv().await {
        squares.push(n * n);
    }
    let _ = producer.await;
    squares
}

pub fn run() {
    println!("=== AsyncTasks ===\n");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            println!("error: could not start runtime: {err}");
            return;
        }
    };

    runtime.block_on(async {
        println!("--- spawn + join_all ---");
        spawned().await;

        println!("\n--- Timeouts ---");
        timeouts().await;

        println!("\n--- mpsc pipeline ---");
        println!("  squares: {:?}", pipeline().await);
    });

    println!("\n=== Key Points ===");
    println!("1. Futures do nothing until awaited or spawned");
    println!("2. join_all waits for every future and keeps their order");
    println!("3. tokio::time::timeout wraps any future with a deadline");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pipeline_squares_in_order() {
        assert_eq!(pipeline().await, vec![1, 4, 9, 16, 25]);
    }
}
