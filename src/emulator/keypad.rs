//! The 16-key hexadecimal keypad.

pub const NUM_KEYS: usize = 16;

/// Which of the keys `0x0`-`0xF` are currently held down.
///
/// The interpreter only reads this, the frontend is responsible for keeping it updated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {

    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Set the state of a key. Only the low nibble of `key` is used.
    pub fn set(&mut self, key: u8, pressed: bool) {
        self.keys[(key & 0xF) as usize] = pressed;
    }

    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS];
    }

    /// Whether a key is held down. Only the low nibble of `key` is used.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// The lowest numbered key that is held down, if any.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|k| *k).map(|k| k as u8)
    }

    /// The keys held down in both `self` and `other`.
    pub fn still_held(&self, other: &Keypad) -> Keypad {
        let mut keys = [false; NUM_KEYS];
        for (key, (a, b)) in keys.iter_mut().zip(self.keys.iter().zip(other.keys.iter())) {
            *key = *a && *b;
        }
        Keypad { keys }
    }

    /// The lowest numbered key held down now that was not held in `earlier`.
    pub fn newly_pressed(&self, earlier: &Keypad) -> Option<u8> {
        self.keys
            .iter()
            .zip(earlier.keys.iter())
            .position(|(now, before)| *now && !*before)
            .map(|k| k as u8)
    }
}
