//! The run loop shared by the frontends.

use std::io;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use super::emulator::Emulator;
use super::error::ExecError;
use super::input::{EmulatorInput, InputEvent};
use super::output::EmulatorOutput;

/// How many instructions run between frames, and how long a frame lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub instructions_per_frame: usize,
    pub frame: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            instructions_per_frame: 10,
            frame: Duration::from_millis(1_000 / 60),
        }
    }
}

/// Why the run loop stopped early.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error("output failed: {0}")]
    Output(#[from] io::Error),
}

/// Why the run loop stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stopped {
    /// The input asked to quit.
    Quit,
    /// The frame limit was reached.
    FrameLimit,
}

/// Run frames until the input quits, `max_frames` is reached, or the emulator faults.
///
/// Every frame polls input, runs a batch of instructions, and presents
/// the display if anything was drawn since it was last presented.
pub fn run<I, O>(
    emulator: &mut Emulator,
    input: &mut I,
    output: &mut O,
    pacing: Pacing,
    max_frames: Option<u64>,
) -> Result<Stopped, RunError>
where
    I: EmulatorInput,
    O: EmulatorOutput,
{
    let mut frames = 0;
    let mut dirty = true;
    loop {
        if max_frames.map_or(false, |max| frames >= max) {
            return Ok(Stopped::FrameLimit);
        }
        if input.poll(emulator.keypad_mut()) == InputEvent::Quit {
            log::info!("Quit after {} frames", frames);
            return Ok(Stopped::Quit);
        }

        for _ in 0..pacing.instructions_per_frame {
            let instruction = emulator.step()?;
            dirty |= instruction.affects_display();
        }

        output.tone(emulator.sound_active())?;
        if dirty {
            output.present(emulator.display())?;
            dirty = false;
        }

        frames += 1;
        if pacing.frame > Duration::from_millis(0) {
            thread::sleep(pacing.frame);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::emulator::error::Fault;
    use crate::emulator::input::{DummyInput, ScriptedInput};
    use crate::emulator::output::DummyOutput;
    use crate::emulator::quirks::Quirks;
    use crate::emulator::display::Display;
    use pretty_assertions::assert_eq;

    const FAST: Pacing = Pacing {
        instructions_per_frame: 4,
        frame: Duration::from_millis(0),
    };

    fn emulator_with(program: &[u8]) -> Emulator {
        let mut emulator = Emulator::with_seed(Quirks::default(), 1);
        emulator.load(program).unwrap();
        emulator
    }

    #[test]
    fn runs_until_frame_limit() {
        // Jump to self
        let mut emulator = emulator_with(&[0x12, 0x00]);
        let mut output = DummyOutput::new();
        let stopped = run(&mut emulator, &mut DummyInput, &mut output, FAST, Some(3)).unwrap();
        assert_eq!(stopped, Stopped::FrameLimit);

        // Only the first frame is presented, nothing is drawn after it
        assert_eq!(output.presented(), 1);
    }

    #[test]
    fn presents_frames_with_draws() {
        let program = [
            0xA0, 0x50, // I = glyph 0
            0xD0, 0x05, // draw at (0, 0)
            0x12, 0x04, // jump to self
        ];
        let mut emulator = emulator_with(&program);
        let mut output = DummyOutput::new();
        run(&mut emulator, &mut DummyInput, &mut output, FAST, Some(2)).unwrap();

        let mut expected = Display::new();
        expected.draw_sprite(0, 0, &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(output.frame(), &expected);
        assert_eq!(output.presented(), 1);
    }

    #[test]
    fn scripted_keys_reach_the_program() {
        let program = [
            0xF3, 0x0A, // V3 = wait for key
            0xF3, 0x29, // I = glyph V3
            0xD0, 0x05, // draw
            0x12, 0x06, // jump to self
        ];
        let mut emulator = emulator_with(&program);
        let mut input = ScriptedInput::new(vec![None, None, Some(0x7), None]);
        let mut output = DummyOutput::new();
        let stopped = run(&mut emulator, &mut input, &mut output, FAST, None).unwrap();
        assert_eq!(stopped, Stopped::Quit);
        assert_eq!(emulator.registers()[3], 0x7);
        assert_eq!(emulator.index(), 0x050 + 35);
        assert!(output.frame().lit_pixels() > 0);
    }

    #[test]
    fn sound_timer_signals_tone() {
        let program = [
            0x60, 0x06, // V0 = 6
            0xF0, 0x18, // sound = V0
            0x12, 0x04, // jump to self
        ];
        let mut emulator = emulator_with(&program);
        let mut output = DummyOutput::new();
        run(&mut emulator, &mut DummyInput, &mut output, FAST, Some(3)).unwrap();
        assert_eq!(output.tone_frames(), 1);
    }

    #[test]
    fn fault_stops_the_loop() {
        let mut emulator = emulator_with(&[0x00, 0xEE]);
        let mut output = DummyOutput::new();
        match run(&mut emulator, &mut DummyInput, &mut output, FAST, None) {
            Err(RunError::Exec(error)) => assert_eq!(error.fault, Fault::StackUnderflow),
            other => panic!("expected a fault, got {:?}", other),
        }
    }
}
