use std::io;

use super::display::Display;

/// Represents an output device that can present the framebuffer.
pub trait EmulatorOutput {
    /// Show whatever the display holds right now.
    fn present(&mut self, display: &Display) -> io::Result<()>;

    /// Called every frame with whether a tone should be playing.
    fn tone(&mut self, _active: bool) -> io::Result<()> {
        Ok(())
    }
}

/// A simple output device that keeps the last presented frame.
pub struct DummyOutput {
    frame: Display,
    presented: usize,
    tone_frames: usize,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput {
            frame: Display::new(),
            presented: 0,
            tone_frames: 0,
        }
    }

    /// The most recently presented frame
    pub fn frame(&self) -> &Display {
        &self.frame
    }

    /// How many times a frame was presented
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// How many frames had the tone active
    pub fn tone_frames(&self) -> usize {
        self.tone_frames
    }
}

impl Default for DummyOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorOutput for DummyOutput {
    fn present(&mut self, display: &Display) -> io::Result<()> {
        self.frame = display.clone();
        self.presented += 1;
        Ok(())
    }

    fn tone(&mut self, active: bool) -> io::Result<()> {
        if active {
            self.tone_frames += 1;
        }
        Ok(())
    }
}
