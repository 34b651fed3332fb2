// Messaging - lock-free channel between the ticker thread and the UI

pub mod channels;

pub use channels::{Tick, TickConsumer, TickProducer, create_tick_channel};
