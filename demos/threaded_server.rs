//! Example: Threaded event-driven server
//!
//! Run with `RUST_LOG=event_watch=trace cargo run --example threaded_server`.
use event_watch::{args, EventManager, Handler};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let manager = EventManager::new();
    manager
        .watch(
            "client_connected",
            Handler::from_fn(|name: String| {
                println!("Client connected: {name}");
            }),
        )
        .unwrap();
    manager
        .watch_once(
            "client_connected",
            Handler::from_fn(|name: String| {
                println!("First client of the day: {name}");
            }),
        )
        .unwrap();
    manager
        .watch_async(
            "message_received",
            Handler::from_fn(|name: String, message: String| {
                println!("Message from {name}: {message}");
            }),
        )
        .unwrap();

    // Simulate server events
    manager.trigger("client_connected", args!["Alice".to_string()]);
    manager.trigger("client_connected", args!["Bob".to_string()]);
    manager.trigger(
        "message_received",
        args!["Alice".to_string(), "Hello from Alice".to_string()],
    );
    manager.wait();
}
