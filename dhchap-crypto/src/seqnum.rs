#![forbid(unsafe_code)]

//! Replay-protection sequence counter.
//!
//! DH-HMAC-CHAP messages carry a 32-bit sequence number that must never be
//! zero and must be fresh within a process lifetime. Rather than a hidden
//! process-wide global, the counter is an injectable context object owned
//! by whoever drives the authentication exchanges.

use std::sync::Mutex;

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

/// Monotonic, non-zero 32-bit sequence counter.
///
/// Lazily seeded from the OS random source on first use; not persisted
/// across restarts.
#[derive(Debug, Default)]
pub struct SequenceGenerator {
    counter: Mutex<u32>,
}

impl SequenceGenerator {
    pub const fn new() -> Self {
        Self {
            counter: Mutex::new(0),
        }
    }

    /// Next sequence number. Seeds on first call, then increments by one,
    /// skipping 0 on wrap-around.
    pub fn next_seqnum(&self) -> u32 {
        let mut counter = match self.counter.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *counter == 0 {
            let mut seed = OsRng.next_u32();
            while seed == 0 {
                seed = OsRng.next_u32();
            }
            *counter = seed;
            debug!("seeded DH-HMAC-CHAP sequence counter");
        } else {
            *counter = counter.wrapping_add(1);
            if *counter == 0 {
                *counter = 1;
            }
        }
        *counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_returns_zero_and_increments() {
        let generator = SequenceGenerator::new();
        let first = generator.next_seqnum();
        assert_ne!(first, 0);
        if first != u32::MAX {
            assert_eq!(generator.next_seqnum(), first.wrapping_add(1));
        } else {
            assert_eq!(generator.next_seqnum(), 1);
        }
    }

    #[test]
    fn wraps_past_zero() {
        let generator = SequenceGenerator::new();
        *generator.counter.lock().unwrap() = u32::MAX;
        assert_eq!(generator.next_seqnum(), 1);
        assert_eq!(generator.next_seqnum(), 2);
    }

    #[test]
    fn independent_generators_do_not_share_state() {
        let a = SequenceGenerator::new();
        let b = SequenceGenerator::new();
        let seq_a = a.next_seqnum();
        a.next_seqnum();
        // b is still unseeded; its first value comes from its own seed.
        let seq_b = b.next_seqnum();
        assert_ne!(seq_b, 0);
        let _ = seq_a;
    }

    #[test]
    fn concurrent_calls_yield_distinct_values() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let generator = Arc::new(SequenceGenerator::new());
        // Seed away from the wrap region so 1000 increments stay distinct.
        *generator.counter.lock().unwrap() = 0x1000_0000;

        let mut handles = Vec::new();
        for _ in 0..4 {
            let generator = Arc::clone(&generator);
            handles.push(std::thread::spawn(move || {
                (0..250).map(|_| generator.next_seqnum()).collect::<Vec<_>>()
            }));
        }
        let mut seen = HashSet::new();
        for handle in handles {
            for seq in handle.join().unwrap() {
                assert_ne!(seq, 0);
                assert!(seen.insert(seq), "duplicate seqnum {seq}");
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
