//! The CHIP-8 virtual machine and the contract between it and a frontend.
//!
//! [`Emulator`](emulator::Emulator) owns all machine state and executes one instruction per
//! [`step`](emulator::Emulator::step). Frontends implement [`EmulatorInput`](input::EmulatorInput)
//! and [`EmulatorOutput`](output::EmulatorOutput), and drive the emulator with [`host::run`].

pub mod display;
pub mod emulator;
pub mod error;
pub mod font;
pub mod host;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod opcode;
pub mod output;
pub mod quirks;

pub use self::display::Display;
pub use self::emulator::Emulator;
pub use self::error::{ExecError, Fault, LoadError};
pub use self::keypad::Keypad;
pub use self::quirks::Quirks;
