mod args;
mod handler;

#[cfg(feature = "tokio")]
mod runtime_dispatch;
