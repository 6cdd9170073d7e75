//! Deterministic trace events emitted during playback when enabled.
//!
//! Tracing is a side channel for hosts that want per-instruction
//! visibility; it is never part of the driver contract and playback
//! behaves identically without a sink.

use crate::fault::FaultCode;
use crate::instruction::Instruction;

/// Trace events in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// An opcode byte was fetched at `offset`.
    InstructionStart {
        /// Stream offset of the opcode byte.
        offset: usize,
        /// Raw opcode byte.
        opcode: u8,
    },
    /// The instruction fetched at `offset` completed its effect.
    InstructionRetired {
        /// Stream offset of the opcode byte.
        offset: usize,
        /// Classified instruction.
        instruction: Instruction,
    },
    /// Playback aborted on the instruction fetched at `offset`.
    FaultRaised {
        /// Stream offset of the opcode byte.
        offset: usize,
        /// Latched fault code.
        cause: FaultCode,
    },
}

/// Sink trait for deterministic trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}
