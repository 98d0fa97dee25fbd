//! The CHIP-8 emulator as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::display::Display;
use super::error::{ExecError, Fault, LoadError};
use super::font::{self, FONT, FONT_BASE};
use super::instruction::*;
use super::keypad::Keypad;
use super::opcode::Opcode;
use super::quirks::{JumpQuirk, KeyWaitQuirk, Quirks, ShiftQuirk};

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const PC_START: u16 = 0x200;

/// The largest program that fits in memory.
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PC_START as usize;

const FLAG: usize = 0xF;

pub struct Emulator {
    // Standard fields
    memory: [u8; MEM_SIZE],
    registers: [u8; NUM_REGISTERS],
    delay_timer: u8,
    sound_timer: u8,
    i: u16,
    program_counter: u16,
    stack_pointer: u8,
    stack: [u16; STACK_SIZE],
    display: Display,
    keypad: Keypad,
    current_opcode: Opcode,

    // Keys already held when FX0A started waiting, these can't answer it
    key_wait: Option<Keypad>,

    quirks: Quirks,
    rng: StdRng,
}

impl Emulator {

    /// Create a new emulator with the default quirks
    pub fn new() -> Emulator {
        Emulator::with_quirks(Quirks::default())
    }

    /// Create a new emulator with the given quirks
    pub fn with_quirks(quirks: Quirks) -> Emulator {
        Emulator::with_rng(quirks, StdRng::from_entropy())
    }

    /// Create a new emulator whose random numbers are reproducible
    pub fn with_seed(quirks: Quirks, seed: u64) -> Emulator {
        Emulator::with_rng(quirks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(quirks: Quirks, rng: StdRng) -> Emulator {
        let mut memory = [0; MEM_SIZE];

        // Load font
        let font_base = FONT_BASE as usize;
        memory[font_base..font_base + FONT.len()].copy_from_slice(&FONT);

        Emulator {
            memory,
            registers: [0; NUM_REGISTERS],
            delay_timer: 0,
            sound_timer: 0,
            i: 0,
            program_counter: PC_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            display: Display::new(),
            keypad: Keypad::new(),
            current_opcode: Opcode::default(),

            key_wait: None,

            quirks,
            rng,
        }
    }

    /// Copy a program into memory at 0x200.
    /// Programs that don't fit are rejected without touching memory.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PC_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Read a whole file and load it as a program, returning its size.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, LoadError> {
        let program = std::fs::read(path.as_ref())?;
        self.load(&program)?;
        log::info!("Loaded {} byte program from {:?}", program.len(), path.as_ref());
        Ok(program.len())
    }

    /// Perform a single step, which will load an instruction,
    /// execute it, then update timers.
    pub fn step(&mut self) -> Result<Instruction, ExecError> {
        let pc = self.program_counter;
        let opcode = self.fetch()?;
        let instruction = Instruction::decode(opcode);

        log::trace!("{:#05x}: {} {:?}", pc, opcode, instruction);
        if let Instruction::Unknown(_) = instruction {
            log::warn!("Unknown opcode {} at {:#05x}", opcode, pc);
        }

        if let Err(fault) = self.execute_single(instruction) {
            let error = ExecError { pc, opcode, fault };
            log::error!("{}", error);
            return Err(error);
        }

        self.tick_timers();
        Ok(instruction)
    }

    /// Read the opcode at the program counter and move past it.
    fn fetch(&mut self) -> Result<Opcode, ExecError> {
        let pc = self.program_counter as usize;
        if pc + 1 >= MEM_SIZE {
            let error = ExecError {
                pc: self.program_counter,
                opcode: self.current_opcode,
                fault: Fault::FetchOutOfBounds,
            };
            log::error!("{}", error);
            return Err(error);
        }

        // Each opcode is two bytes
        self.current_opcode = Opcode::from_two_u8(self.memory[pc], self.memory[pc + 1]);
        self.program_counter += 2;
        Ok(self.current_opcode)
    }

    /// Decrement both timers towards zero
    fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// Execute instructions in order, stopping at the first fault
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), Fault> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    /// Execute a single instruction
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), Fault> {
        match instruction {

            // Clear the screen
            Instruction::ClearScreen => self.display.clear(),

            // Return to the previous call site via the stack.
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(Fault::StackUnderflow);
                }
                self.stack_pointer -= 1;
                self.program_counter = self.stack[self.stack_pointer as usize]; // Jump back via stack
            }

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer as usize >= STACK_SIZE {
                    return Err(Fault::StackOverflow);
                }
                self.stack[self.stack_pointer as usize] = self.program_counter; // Store current address
                self.stack_pointer += 1;
                self.program_counter = addr; // Jump to addr
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) == n);
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) != n);
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) == self.reg(y));
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.set_reg(x, n);
            }

            // Wraps, and leaves VF alone
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.set_reg(x, self.reg(x).wrapping_add(n));
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(y));
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) | self.reg(y));
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) & self.reg(y));
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) ^ self.reg(y));
            }

            // Increment the value of a register by the value of another.
            // VF is 1 if there is a carry, 0 otherwise.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_reg(x, sum);
                self.registers[FLAG] = carry as u8;
            }

            // Decrement the value of a register by the value of another.
            // VF is 1 if VX was strictly greater than VY, 0 otherwise.
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_reg(x, vx.wrapping_sub(vy));
                self.registers[FLAG] = (vx > vy) as u8;
            }

            // VF is the bit that was shifted out
            Instruction::BitshiftRight(Reg(x), Reg(y)) => {
                let value = self.shift_source(x, y);
                self.set_reg(x, value >> 1);
                self.registers[FLAG] = value & 1;
            }

            // VF is 1 if VY was strictly greater than VX, 0 otherwise.
            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_reg(x, vy.wrapping_sub(vx));
                self.registers[FLAG] = (vy > vx) as u8;
            }

            Instruction::BitshiftLeft(Reg(x), Reg(y)) => {
                let value = self.shift_source(x, y);
                self.set_reg(x, value << 1);
                self.registers[FLAG] = value >> 7;
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) != self.reg(y));
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::JumpWithOffset(Reg(x), Addr(addr)) => {
                self.program_counter = match self.quirks.jump {
                    JumpQuirk::VxPlusNn => (addr & 0xFF) + self.reg(x) as u16,
                    JumpQuirk::V0PlusNnn => addr + self.registers[0] as u16,
                };
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                let value = self.rng.gen::<u8>() & n;
                self.set_reg(x, value);
            }

            // XOR a sprite of `sprite_height` rows from memory at I onto the screen
            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                let mut sprite = [0; 15];
                let sprite = &mut sprite[..sprite_height as usize];
                for (row, byte) in sprite.iter_mut().enumerate() {
                    *byte = self.memory[self.i_offset(row)];
                }

                let (vx, vy) = (self.reg(x), self.reg(y));
                let collision = self.display.draw_sprite(vx, vy, sprite);

                // Set VF collision flag
                self.registers[FLAG] = collision as u8;
            }

            // Skip if the key in Vx is pressed
            Instruction::IfKeyEqVx(Reg(x)) => {
                self.skip_if(self.keypad.is_pressed(self.reg(x)));
            }

            // Skip if the key in Vx isn't pressed
            Instruction::IfKeyNeqVx(Reg(x)) => {
                self.skip_if(!self.keypad.is_pressed(self.reg(x)));
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.set_reg(x, self.delay_timer);
            }

            // Wait for a key press by running this instruction again until one arrives
            Instruction::SetRegToGetKey(Reg(x)) => {
                let key = match self.quirks.key_wait {
                    KeyWaitQuirk::Keypad => {
                        let held = self
                            .key_wait
                            .map_or(self.keypad, |held| held.still_held(&self.keypad));
                        let key = self.keypad.newly_pressed(&held);
                        self.key_wait = if key.is_some() { None } else { Some(held) };
                        key
                    }
                    KeyWaitQuirk::RegisterScan => self
                        .registers
                        .iter()
                        .position(|value| *value != 0)
                        .map(|index| index as u8),
                };
                match key {
                    Some(key) => self.set_reg(x, key),
                    None => self.program_counter = self.program_counter.wrapping_sub(2),
                }
            }

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.delay_timer = self.reg(x);
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.sound_timer = self.reg(x);
            }

            // VF is 1 if I overflows 16 bits, 0 otherwise
            Instruction::AddRegToI(Reg(x)) => {
                let (sum, overflow) = self.i.overflowing_add(self.reg(x) as u16);
                self.i = sum;
                self.registers[FLAG] = overflow as u8;
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = font::glyph_addr(self.reg(x));
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = self.reg(x);
                self.memory[self.i_offset(0)] = value / 100;
                self.memory[self.i_offset(1)] = value / 10 % 10;
                self.memory[self.i_offset(2)] = value % 10;
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                for reg_no in 0..=x as usize {
                    self.memory[self.i_offset(reg_no)] = self.registers[reg_no];
                }
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                for reg_no in 0..=x as usize {
                    self.registers[reg_no] = self.memory[self.i_offset(reg_no)];
                }
            }

            // Already reported when decoded
            Instruction::Unknown(_) => {}
        };

        Ok(())
    }

    fn reg(&self, x: u8) -> u8 {
        self.registers[(x & 0xF) as usize]
    }

    fn set_reg(&mut self, x: u8, value: u8) {
        self.registers[(x & 0xF) as usize] = value;
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter += 2;
        }
    }

    fn shift_source(&self, x: u8, y: u8) -> u8 {
        match self.quirks.shift {
            ShiftQuirk::CopyVy => self.reg(y),
            ShiftQuirk::InPlace => self.reg(x),
        }
    }

    /// Memory index `offset` bytes past I, wrapping around memory.
    fn i_offset(&self, offset: usize) -> usize {
        (self.i as usize + offset) % MEM_SIZE
    }

    /// The framebuffer as it is right now
    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The keypad, for the frontend to update
    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn stack_depth(&self) -> usize {
        self.stack_pointer as usize
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    pub fn current_opcode(&self) -> Opcode {
        self.current_opcode
    }

    pub fn memory(&self) -> &[u8; MEM_SIZE] {
        &self.memory
    }

    /// Memory reserved for the interpreter, including the font
    pub fn reserved_memory(&self) -> &[u8] {
        &self.memory[..PC_START as usize]
    }

    /// Memory available to programs
    pub fn program_memory(&self) -> &[u8] {
        &self.memory[PC_START as usize..]
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
