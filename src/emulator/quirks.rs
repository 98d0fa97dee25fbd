//! Behaviour where historical CHIP-8 interpreters disagree.
//!
//! The defaults reproduce the behaviour this interpreter has always had,
//! the alternatives exist for programs written against other interpreters.

/// How `8XY6` and `8XYE` pick the value to shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftQuirk {
    /// Copy VY into VX, then shift VX.
    CopyVy,
    /// Shift VX in place, ignoring VY.
    InPlace,
}

/// How `BXNN` computes its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpQuirk {
    /// Jump to `NN + VX`.
    VxPlusNn,
    /// Jump to `NNN + V0`.
    V0PlusNnn,
}

/// How `FX0A` decides that a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWaitQuirk {
    /// Wait until a key on the keypad goes down, then store it. Keys already held
    /// when the wait began only count once they are released and pressed again.
    Keypad,
    /// Store the index of the first register holding a nonzero value,
    /// waiting while every register is zero. Only useful for programs
    /// that depend on this behaviour of early builds.
    RegisterScan,
}

/// The full set of quirk choices an emulator runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    pub shift: ShiftQuirk,
    pub jump: JumpQuirk,
    pub key_wait: KeyWaitQuirk,
}

impl Default for ShiftQuirk {
    fn default() -> Self {
        ShiftQuirk::CopyVy
    }
}

impl Default for JumpQuirk {
    fn default() -> Self {
        JumpQuirk::VxPlusNn
    }
}

impl Default for KeyWaitQuirk {
    fn default() -> Self {
        KeyWaitQuirk::Keypad
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            shift: ShiftQuirk::default(),
            jump: JumpQuirk::default(),
            key_wait: KeyWaitQuirk::default(),
        }
    }
}
