//! Walkthrough of the three constructors: an explicit executor, the
//! function adapter, and a join that fails fast.

use std::thread;
use std::time::Duration;

use promise_join::{all, Promise, Thenable};

fn slow_value() -> Vec<String> {
    println!("Running workload...");
    thread::sleep(Duration::from_millis(300));
    println!("Finished workload!");
    vec!["Some result".to_string()]
}

fn slow_failure() -> Result<String, String> {
    println!("Running workload...");
    thread::sleep(Duration::from_millis(200));
    println!("Finished workload!");
    Err("Test error".to_string())
}

fn main() {
    let explicit = Promise::<String, String>::new(|_resolve, reject| {
        println!("Running process...");
        thread::sleep(Duration::from_millis(200));
        println!("Finished work!");
        reject.reject(vec!["Some error".to_string()]);
    });
    explicit.observe(
        |values| println!("{values:?}"),
        |rejection| println!("{rejection:?}"),
    );

    println!("\n==================\n");

    let adapted = Promise::<String, String>::from_fn(slow_value);
    adapted.observe(
        |values| println!("{values:?}"),
        |rejection| println!("{rejection:?}"),
    );

    println!("\n==================\n");

    let value = Promise::<String, String>::from_fn(slow_value);
    let failure = Promise::<String, String>::from_fn(slow_failure);
    all(vec![value, failure]).observe(
        |values| {
            println!("JOIN: Success!");
            println!("{values:?}");
        },
        |rejection| {
            println!("JOIN: Failure!");
            println!("{rejection:?}");
        },
    );
}
