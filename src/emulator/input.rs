use super::keypad::Keypad;

/// What the frontend wants the run loop to do after polling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Continue,
    Quit,
}

/// Represents an input device that is capable of providing keys in the range 0..0xF.
pub trait EmulatorInput {
    /// Write the current state of every key into `keypad`.
    fn poll(&mut self, keypad: &mut Keypad) -> InputEvent;
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self, _: &mut Keypad) -> InputEvent {
        InputEvent::Continue
    }
}

/// Replays a fixed sequence of keypad states, one per poll, then quits.
pub struct ScriptedInput {
    frames: std::vec::IntoIter<Option<u8>>,
}

impl ScriptedInput {
    /// Each entry is the key held during that frame, if any.
    pub fn new(frames: Vec<Option<u8>>) -> ScriptedInput {
        ScriptedInput {
            frames: frames.into_iter(),
        }
    }
}

impl EmulatorInput for ScriptedInput {
    fn poll(&mut self, keypad: &mut Keypad) -> InputEvent {
        match self.frames.next() {
            Some(key) => {
                keypad.release_all();
                if let Some(key) = key {
                    keypad.press(key);
                }
                InputEvent::Continue
            }
            None => InputEvent::Quit,
        }
    }
}
