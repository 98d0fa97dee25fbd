use log::LevelFilter;
use structopt::StructOpt;

use chip_8_vm::cli::{self, Opt};
use chip_8_vm::emulator::host::{self, Pacing, RunError};
use chip_8_vm::emulator::Emulator;

mod crossterm_io;
mod key_buffer;
mod key_manager;

use crossterm_io::{CrosstermInput, CrosstermOutput};
use key_manager::KeyManager;

fn main() {
    // Get configuration
    let opt = Opt::from_args();

    // Logs go to stderr and would draw over the screen, so only errors unless asked
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(opt.log_level_with_default(LevelFilter::Error))
        .target(env_logger::Target::Stderr);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();

    std::process::exit(run(&opt));
}

fn run(opt: &Opt) -> i32 {
    log::info!("Executing {:?}", &opt.input);

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_quirks(opt.quirks());
    if let Err(error) = emulator.load_file(&opt.input) {
        log::error!("Cannot load {:?}: {}", opt.input, error);
        eprintln!("Cannot load {:?}: {}", opt.input, error);
        cli::log_memory("Reserved memory", 0, emulator.reserved_memory());
        return 1;
    }

    let key_manager = KeyManager::new();
    let result = match CrosstermOutput::new() {
        Ok(mut output) => {
            let mut input = CrosstermInput::new(&key_manager);
            host::run(&mut emulator, &mut input, &mut output, Pacing::default(), None)
        }
        Err(error) => Err(RunError::Output(error)),
    };
    // The terminal is restored at this point, so errors can be printed

    match result {
        Ok(_) => 0,
        Err(RunError::Exec(error)) => {
            eprintln!("Halted: {}", error);
            cli::log_memory("Program memory", 0x200, emulator.program_memory());
            2
        }
        Err(RunError::Output(error)) => {
            eprintln!("Terminal error: {}", error);
            1
        }
    }
}
