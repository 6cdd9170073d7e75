//! XSVF instruction set and opcode classification table.

use crate::fault::FaultCode;
use crate::tap::TapState;

/// The implemented XSVF instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Instruction {
    /// XCOMPLETE: normal end of the stream.
    Complete,
    /// XTDOMASK: set the significance mask for DR compares.
    TdoMask,
    /// XSIR: shift a value through the instruction register.
    ShiftIr,
    /// XRUNTEST: set the Run-Test/Idle dwell for later scans.
    RunTest,
    /// XREPEAT: set the retry count for failing scans.
    Repeat,
    /// XSDRSIZE: set the DR scan width for later XTDOMASK/XSDRTDO.
    DrSize,
    /// XSDRTDO: shift DR and compare captured TDO against expectations.
    ShiftDrTdo,
    /// XSTATE: drive the TAP to an explicit state.
    GotoState,
    /// XENDIR: select the state the TAP parks in after IR scans.
    EndIr,
    /// XENDDR: select the state the TAP parks in after DR scans.
    EndDr,
    /// XWAIT: dwell in a state for a number of cycles or microseconds.
    Wait,
}

/// Single source-of-truth opcode table.
///
/// Any opcode byte not present here is unsupported by definition: the
/// reserved codes inside the 24-entry format table as well as everything
/// at or beyond 0x18.
pub const INSTRUCTION_TABLE: &[(u8, Instruction)] = &[
    (0x00, Instruction::Complete),
    (0x01, Instruction::TdoMask),
    (0x02, Instruction::ShiftIr),
    (0x04, Instruction::RunTest),
    (0x07, Instruction::Repeat),
    (0x08, Instruction::DrSize),
    (0x09, Instruction::ShiftDrTdo),
    (0x12, Instruction::GotoState),
    (0x13, Instruction::EndIr),
    (0x14, Instruction::EndDr),
    (0x17, Instruction::Wait),
];

impl Instruction {
    /// The opcode byte this instruction is encoded as.
    #[must_use]
    pub const fn opcode(self) -> u8 {
        match self {
            Self::Complete => 0x00,
            Self::TdoMask => 0x01,
            Self::ShiftIr => 0x02,
            Self::RunTest => 0x04,
            Self::Repeat => 0x07,
            Self::DrSize => 0x08,
            Self::ShiftDrTdo => 0x09,
            Self::GotoState => 0x12,
            Self::EndIr => 0x13,
            Self::EndDr => 0x14,
            Self::Wait => 0x17,
        }
    }

    /// The historical XSVF mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Complete => "XCOMPLETE",
            Self::TdoMask => "XTDOMASK",
            Self::ShiftIr => "XSIR",
            Self::RunTest => "XRUNTEST",
            Self::Repeat => "XREPEAT",
            Self::DrSize => "XSDRSIZE",
            Self::ShiftDrTdo => "XSDRTDO",
            Self::GotoState => "XSTATE",
            Self::EndIr => "XENDIR",
            Self::EndDr => "XENDDR",
            Self::Wait => "XWAIT",
        }
    }
}

/// Returns the implemented instruction for an opcode byte.
///
/// `None` means unsupported: reserved, unimplemented, or out of range.
#[must_use]
pub fn classify_opcode(opcode: u8) -> Option<Instruction> {
    INSTRUCTION_TABLE
        .iter()
        .find_map(|(entry, instruction)| (*entry == opcode).then_some(*instruction))
}

/// Historical mnemonic for a reserved-but-named opcode, for diagnostics.
///
/// Covers the format revisions' unimplemented instructions; opcodes with
/// no assigned name (0x05, 0x06, anything ≥ 0x18) return `None`.
#[must_use]
pub const fn reserved_mnemonic(opcode: u8) -> Option<&'static str> {
    match opcode {
        0x03 => Some("XSDR"),
        0x0A => Some("XSETSDRMASKS"),
        0x0B => Some("XSDRINC"),
        0x0C => Some("XSDRB"),
        0x0D => Some("XSDRC"),
        0x0E => Some("XSDRE"),
        0x0F => Some("XSDRTDOB"),
        0x10 => Some("XSDRTDOC"),
        0x11 => Some("XSDRTDOE"),
        0x15 => Some("XSIR2"),
        0x16 => Some("XCOMMENT"),
        _ => None,
    }
}

/// Maps an XENDIR/XENDDR selector byte to its park state.
///
/// Selector 0 parks in Run-Test/Idle, selector 1 in the scan path's
/// pause state (`pause`).
///
/// # Errors
///
/// Returns [`FaultCode::InvalidEndState`] for any other selector.
pub const fn end_state(selector: u8, pause: TapState) -> Result<TapState, FaultCode> {
    match selector {
        0 => Ok(TapState::RunTestIdle),
        1 => Ok(pause),
        _ => Err(FaultCode::InvalidEndState),
    }
}
