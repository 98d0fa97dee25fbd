use crossterm::event::KeyCode;
use std::{
    collections::VecDeque,
    sync::Mutex,
    time::{Duration, SystemTime},
};

/// A thread-safe buffer for storing keys and timestamps.
/// For use with a producer and consumer of keys.
/// Wrap it in an `std::sync::Arc` and you are good to go.
pub struct KeyBuffer {
    timeout: Duration,
    buffer: Mutex<VecDeque<(KeyCode, SystemTime)>>,
}

impl KeyBuffer {

    /// Create a new `KeyBuffer`, but don't return keypresses that are older than `timeout`.
    pub fn new(timeout: Duration) -> KeyBuffer {
        KeyBuffer {
            timeout,
            buffer: Mutex::new(VecDeque::new()),
        }
    }

    /// Push a new keypress to the buffer.
    pub fn push(&self, key_code: KeyCode) {
        if let Ok(mut guard) = self.buffer.lock() {
            guard.push_back((key_code, SystemTime::now()));
        }
    }

    /// Pop the oldest keypress that is still fresh, discarding stale ones on the way.
    pub fn pop(&self) -> Option<KeyCode> {
        let mut guard = self.buffer.lock().ok()?;
        while let Some((key_code, timestamp)) = guard.pop_front() {
            let fresh = timestamp
                .elapsed()
                .map_or(true, |elapsed| elapsed < self.timeout);
            if fresh {
                return Some(key_code);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn push_and_pop() {
        let kb = Arc::new(KeyBuffer::new(Duration::from_millis(100)));

        let kb_c1 = kb.clone();
        let kb_c2 = kb.clone();
        let input = KeyCode::Char('w');

        let producer = thread::spawn(move || {
            kb_c1.push(input)
        });

        producer.join().unwrap(); // Ensure the push has been done
        let consumer = thread::spawn(move || {
            kb_c2.pop()
        });

        let output = consumer.join().unwrap();
        assert_eq!(output, Some(input));
        assert_eq!(kb.pop(), None);
    }

    #[test]
    fn keys_come_out_in_order() {
        let kb = KeyBuffer::new(Duration::from_millis(100));
        kb.push(KeyCode::Char('1'));
        kb.push(KeyCode::Esc);
        assert_eq!(kb.pop(), Some(KeyCode::Char('1')));
        assert_eq!(kb.pop(), Some(KeyCode::Esc));
        assert_eq!(kb.pop(), None);
    }

    #[test]
    fn stale_keys_are_dropped() {
        let kb = KeyBuffer::new(Duration::from_millis(5));
        kb.push(KeyCode::Char('1'));
        thread::sleep(Duration::from_millis(20));
        assert_eq!(kb.pop(), None);
    }
}
