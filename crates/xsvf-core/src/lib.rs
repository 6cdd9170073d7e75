//! XSVF playback core.
//!
//! Interprets the compact binary XSVF encoding of JTAG boundary-scan
//! operations and drives them against an abstract TAP driver. The crate
//! never touches hardware: hosts implement [`TapDriver`] over their
//! cable or GPIO layer and hand the raw file bytes to [`XsvfPlayer`].

/// Packed bit-vector primitive for scan data.
pub mod bits;
pub use bits::BitVector;

/// Fault taxonomy types for decode and scan failures.
pub mod fault;
pub use fault::{FaultClass, FaultCode};

/// IEEE 1149.1 TAP controller states with their XSVF wire encoding.
pub mod tap;
pub use tap::TapState;

/// XSVF instruction set and opcode classification table.
pub mod instruction;
pub use instruction::{
    classify_opcode, end_state, reserved_mnemonic, Instruction, INSTRUCTION_TABLE,
};

/// Bounds-checked cursor over a raw XSVF byte stream.
pub mod reader;
pub use reader::StreamReader;

/// TAP driver contract consumed by playback.
pub mod driver;
pub use driver::{ShiftResult, TapDriver};

/// Deterministic trace events emitted during playback when enabled.
pub mod trace;
pub use trace::{TraceEvent, TraceSink};

/// XSVF playback engine.
pub mod player;
pub use player::XsvfPlayer;

/// Instruction listing for offline stream inspection.
pub mod disasm;
pub use disasm::{disassemble, ListingRow};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
