//! XSVF playback engine.
//!
//! A fetch-decode-execute loop over the opcode stream: each iteration
//! reads one opcode byte, classifies it against the instruction table,
//! decodes exactly the fields that instruction defines, and either
//! mutates the session state or issues one call on the TAP driver.
//! Decoding is stateful: the field width of XTDOMASK and XSDRTDO is the
//! most recently set XSDRSIZE value.
//!
//! The first fault latches, stops the loop, and leaves device-side
//! effects already issued as-is. There is no retry and no rollback; a
//! failed run means the device state cannot be trusted.

use crate::bits::BitVector;
use crate::driver::TapDriver;
use crate::fault::FaultCode;
use crate::instruction::{classify_opcode, end_state, Instruction};
use crate::reader::StreamReader;
use crate::tap::TapState;
use crate::trace::{TraceEvent, TraceSink};

/// Mutable interpreter state carried across instructions for one run.
struct Session {
    /// DR scan width consumed by XTDOMASK and XSDRTDO. Defaults to 0.
    dr_size: u32,
    /// Significance mask for DR compares. Reset to empty whenever
    /// `dr_size` changes.
    tdo_mask: BitVector,
    done: bool,
}

impl Session {
    const fn new() -> Self {
        Self {
            dr_size: 0,
            tdo_mask: BitVector::empty(),
            done: false,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn dr_bits(&self) -> usize {
        self.dr_size as usize
    }
}

/// One completed playback run over an XSVF stream.
///
/// Construction interprets the whole stream against the given driver;
/// there is no incremental API. Afterwards the outcome is queryable:
/// [`failed`](Self::failed) for the contract-level boolean, plus the
/// latched fault code and the stream offset of the aborting opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XsvfPlayer {
    fault: Option<FaultCode>,
    fault_offset: Option<usize>,
    instructions_retired: u32,
}

impl XsvfPlayer {
    /// Interprets `stream` to completion against `tap`.
    #[must_use]
    pub fn new<D: TapDriver + ?Sized>(stream: &[u8], tap: &mut D) -> Self {
        Self::run(stream, tap, None)
    }

    /// Interprets `stream` to completion against `tap`, reporting each
    /// instruction to `sink` in execution order.
    #[must_use]
    pub fn with_trace<D: TapDriver + ?Sized>(
        stream: &[u8],
        tap: &mut D,
        sink: &mut dyn TraceSink,
    ) -> Self {
        Self::run(stream, tap, Some(sink))
    }

    /// True when playback aborted before reaching XCOMPLETE.
    #[must_use]
    pub const fn failed(&self) -> bool {
        self.fault.is_some()
    }

    /// The latched fault, when playback aborted.
    #[must_use]
    pub const fn fault(&self) -> Option<FaultCode> {
        self.fault
    }

    /// Stream offset of the opcode byte that aborted playback.
    #[must_use]
    pub const fn fault_offset(&self) -> Option<usize> {
        self.fault_offset
    }

    /// Number of instructions that completed their effect.
    #[must_use]
    pub const fn instructions_retired(&self) -> u32 {
        self.instructions_retired
    }

    fn run<D: TapDriver + ?Sized>(
        stream: &[u8],
        tap: &mut D,
        mut sink: Option<&mut dyn TraceSink>,
    ) -> Self {
        let mut reader = StreamReader::new(stream);
        let mut session = Session::new();
        let mut retired = 0u32;

        while !session.done {
            let offset = reader.position();
            match step(&mut reader, &mut session, tap, &mut sink, offset) {
                Ok(instruction) => {
                    retired = retired.saturating_add(1);
                    emit(
                        &mut sink,
                        TraceEvent::InstructionRetired {
                            offset,
                            instruction,
                        },
                    );
                }
                Err(cause) => {
                    emit(&mut sink, TraceEvent::FaultRaised { offset, cause });
                    return Self {
                        fault: Some(cause),
                        fault_offset: Some(offset),
                        instructions_retired: retired,
                    };
                }
            }
        }

        Self {
            fault: None,
            fault_offset: None,
            instructions_retired: retired,
        }
    }
}

fn emit(sink: &mut Option<&mut dyn TraceSink>, event: TraceEvent) {
    if let Some(sink) = sink.as_deref_mut() {
        sink.on_event(event);
    }
}

/// Fetches, decodes, and executes one instruction.
fn step<D: TapDriver + ?Sized>(
    reader: &mut StreamReader<'_>,
    session: &mut Session,
    tap: &mut D,
    sink: &mut Option<&mut dyn TraceSink>,
    offset: usize,
) -> Result<Instruction, FaultCode> {
    let opcode = reader.read_u8()?;
    emit(sink, TraceEvent::InstructionStart { offset, opcode });

    let instruction = classify_opcode(opcode).ok_or(FaultCode::UnsupportedInstruction)?;
    match instruction {
        Instruction::Complete => session.done = true,
        Instruction::TdoMask => session.tdo_mask = reader.read_bits(session.dr_bits())?,
        Instruction::ShiftIr => {
            let length = reader.read_u8()?;
            let tdi = reader.read_bits(usize::from(length))?;
            if tap.shift_ir(&tdi).is_mismatch() {
                return Err(FaultCode::ShiftMismatch);
            }
        }
        Instruction::RunTest => tap.set_run_test(reader.read_u32()?),
        Instruction::Repeat => tap.set_repeat(reader.read_u8()?),
        Instruction::DrSize => {
            session.dr_size = reader.read_u32()?;
            session.tdo_mask = BitVector::empty();
        }
        Instruction::ShiftDrTdo => {
            let tdi = reader.read_bits(session.dr_bits())?;
            let expected = reader.read_bits(session.dr_bits())?;
            if tap.shift_dr(&tdi, &expected, &session.tdo_mask).is_mismatch() {
                return Err(FaultCode::ShiftMismatch);
            }
        }
        Instruction::GotoState => tap.state(reader.read_state()?),
        Instruction::EndIr => tap.set_end_ir(end_state(reader.read_u8()?, TapState::PauseIr)?),
        Instruction::EndDr => tap.set_end_dr(end_state(reader.read_u8()?, TapState::PauseDr)?),
        Instruction::Wait => {
            let wait_state = reader.read_state()?;
            let end = reader.read_state()?;
            let amount = reader.read_u32()?;
            tap.wait(wait_state, end, amount);
        }
    }

    Ok(instruction)
}
