//! Command line options shared by the frontends.

use std::path::PathBuf;

use log::LevelFilter;
use structopt::StructOpt;

use crate::emulator::quirks::{JumpQuirk, KeyWaitQuirk, Quirks, ShiftQuirk};

/// Run a CHIP-8 program.
#[derive(StructOpt, Debug)]
pub struct Opt {
    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,

    /// Shift VX in place instead of copying VY into it first (8XY6, 8XYE)
    #[structopt(long)]
    pub shift_in_place: bool,

    /// Jump to V0 + NNN instead of VX + NN (BNNN)
    #[structopt(long)]
    pub jump_v0: bool,

    /// Wait for a nonzero register instead of a key press (FX0A)
    #[structopt(long)]
    pub register_key_wait: bool,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    pub input: PathBuf,
}

impl Opt {
    /// The quirks selected on the command line
    pub fn quirks(&self) -> Quirks {
        Quirks {
            shift: if self.shift_in_place { ShiftQuirk::InPlace } else { ShiftQuirk::CopyVy },
            jump: if self.jump_v0 { JumpQuirk::V0PlusNnn } else { JumpQuirk::VxPlusNn },
            key_wait: if self.register_key_wait {
                KeyWaitQuirk::RegisterScan
            } else {
                KeyWaitQuirk::Keypad
            },
        }
    }

    /// Warnings by default, one level more per `-v`
    pub fn log_level(&self) -> LevelFilter {
        self.log_level_with_default(LevelFilter::Warn)
    }

    /// `default` without `-v`, then info, debug and trace
    pub fn log_level_with_default(&self, default: LevelFilter) -> LevelFilter {
        match self.verbose {
            0 => default,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Log a memory region as rows of hex words, for diagnosing bad programs.
pub fn log_memory(title: &str, start: usize, memory: &[u8]) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    log::debug!("{}", title);
    for (row, chunk) in memory.chunks(32).enumerate() {
        let words: Vec<String> = chunk
            .chunks(2)
            .map(|pair| pair.iter().map(|b| format!("{:02X}", b)).collect())
            .collect();
        log::debug!("{:#05x}: {}", start + row * 32, words.join(" "));
    }
}
