/*!

A CHIP-8 interpreter as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the interpreter on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release -- <program>`.
The keys `1234`, `qwer`, `asdf` and `zxcv` make up the keypad, and `Esc` quits.
Pass `-v` one or more times to get logs on stderr, which you will want to redirect to a file.

# Library

The main way of running a program is to load instructions as bytes.

```rust
use chip_8_vm::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display).unwrap();
emulator.step().unwrap(); // Will now clear the display
assert_eq!(emulator.program_counter(), 0x202);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip_8_vm::emulator::Emulator;
use chip_8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();

assert_eq!(emulator.registers()[0xB], 35);
```

## Quirks

Some instructions behave differently across historical interpreters.
The defaults can be changed with [`Quirks`](emulator::Quirks).

```rust
use chip_8_vm::emulator::{Emulator, Quirks};
use chip_8_vm::emulator::quirks::ShiftQuirk;

let quirks = Quirks { shift: ShiftQuirk::InPlace, ..Quirks::default() };
let emulator = Emulator::with_quirks(quirks);
assert_eq!(emulator.quirks().shift, ShiftQuirk::InPlace);
```

## Custom input and output

To get keypresses and show the screen, implement `EmulatorInput` and `EmulatorOutput`.
These tell the run loop how to update the keypad, and how to present the display respectively.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs` to see how to implement this, then do the following.

```ignore
use chip_8_vm::emulator::{Emulator, host::{self, Pacing}};

let mut emulator = Emulator::new();
emulator.load_file("game.ch8")?;
host::run(&mut emulator, &mut MyInput::new(), &mut MyOutput::new(), Pacing::default(), None)?;
```

This is how the crossterm frontend in `src/bin/crossterm_frontend` is built.
*/

pub mod cli;
pub mod emulator;
