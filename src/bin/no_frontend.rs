use structopt::StructOpt;

use chip_8_vm::cli::{self, Opt};
use chip_8_vm::emulator::host::{self, Pacing};
use chip_8_vm::emulator::{input::DummyInput, output::DummyOutput};
use chip_8_vm::emulator::Emulator;

/// Run a program without a screen or keyboard, then print the screen.
#[derive(StructOpt)]
struct HeadlessOpt {
    /// How many frames to run before stopping
    #[structopt(long, default_value = "600")]
    frames: u64,

    #[structopt(flatten)]
    opt: Opt,
}

fn main() {
    let HeadlessOpt { frames, opt } = HeadlessOpt::from_args();
    pretty_env_logger::formatted_builder()
        .filter_level(opt.log_level())
        .init();

    // Get configuration and read input file
    log::info!("Executing {:?}", &opt.input);
    let mut emulator = Emulator::with_quirks(opt.quirks());
    if let Err(error) = emulator.load_file(&opt.input) {
        eprintln!("Cannot load {:?}: {}", opt.input, error);
        cli::log_memory("Reserved memory", 0, emulator.reserved_memory());
        std::process::exit(1);
    }

    // Start execution
    let mut output = DummyOutput::new();
    let result = host::run(
        &mut emulator,
        &mut DummyInput,
        &mut output,
        Pacing::default(),
        Some(frames),
    );
    print!("{}", output.frame());

    if let Err(error) = result {
        eprintln!("Halted: {}", error);
        cli::log_memory("Program memory", 0x200, emulator.program_memory());
        std::process::exit(2);
    }
}
