// Tick channel - SPSC ringbuffer from the ticker thread to the frame loop

use std::time::Instant;

use ringbuf::{HeapRb, traits::Split};

/// One metronome beat, stamped when the ticker emitted it.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    pub at: Instant,
}

impl Tick {
    pub fn now() -> Self {
        Self { at: Instant::now() }
    }
}

pub type TickProducer = ringbuf::HeapProd<Tick>;
pub type TickConsumer = ringbuf::HeapCons<Tick>;

pub fn create_tick_channel(capacity: usize) -> (TickProducer, TickConsumer) {
    let rb = HeapRb::<Tick>::new(capacity);
    rb.split()
}
