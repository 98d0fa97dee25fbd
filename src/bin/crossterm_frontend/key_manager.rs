use super::key_buffer::KeyBuffer;
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const KEY_TIMEOUT: Duration = Duration::from_millis(250);
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A struct for managing keypresses that will automatically
/// start a thread that grabs keypresses.
pub struct KeyManager {
    stop: Arc<AtomicBool>,
    key_buffer: Arc<KeyBuffer>,
    event_listener: Option<JoinHandle<()>>,
}

impl KeyManager {
    // Start event listener thread
    pub fn new() -> KeyManager {
        let stop = Arc::new(AtomicBool::new(false));
        let key_buffer = Arc::new(KeyBuffer::new(KEY_TIMEOUT));
        let event_listener = event_listener(stop.clone(), key_buffer.clone());
        KeyManager {
            stop,
            key_buffer,
            event_listener: Some(event_listener),
        }
    }

    /// Get the oldest unhandled key press, if one exists
    pub fn next_key(&self) -> Option<KeyCode> {
        self.key_buffer.pop()
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop, and wait for it
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.event_listener.take() {
            if handle.join().is_err() {
                log::warn!("Key listener panicked");
            }
        }
    }
}

/// Starts a thread that listens for key events and pushes them to the key buffer.
fn event_listener(stop: Arc<AtomicBool>, key_buffer: Arc<KeyBuffer>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::SeqCst) {
            match poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(error) => {
                    log::error!("Could not poll for events: {}", error);
                    break;
                }
            }

            let event = match read() {
                Ok(event) => event,
                Err(error) => {
                    log::error!("Could not read event: {}", error);
                    break;
                }
            };
            log::debug!("Got event {:?}", event);

            // Raw mode swallows Ctrl-C, so treat it like Esc
            match event {
                Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. })
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    key_buffer.push(KeyCode::Esc);
                }
                Event::Key(key_event) => key_buffer.push(key_event.code),
                _ => {}
            }
        }
    })
}
