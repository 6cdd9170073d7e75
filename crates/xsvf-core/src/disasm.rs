//! Instruction listing for offline stream inspection.
//!
//! Walks an XSVF stream with the same reader and opcode table as the
//! player, tracking the DR scan width exactly as the player does, and
//! renders one row per instruction. Never calls a TAP driver, so it is
//! safe to run against untrusted files.

use crate::fault::FaultCode;
use crate::instruction::{classify_opcode, end_state, reserved_mnemonic, Instruction};
use crate::reader::StreamReader;
use crate::tap::TapState;

/// A single rendered instruction row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ListingRow {
    /// Stream offset of the opcode byte.
    pub offset: usize,
    /// Encoded length of the instruction in bytes.
    pub len_bytes: usize,
    /// Instruction mnemonic, or a `.byte` rendering for unassigned
    /// opcodes.
    pub mnemonic: String,
    /// Rendered operand fields.
    pub operands: String,
    /// False for the terminal row of a stream the player would abort on.
    pub is_supported: bool,
}

/// Renders `stream` as an instruction listing.
///
/// Decoding stops at XCOMPLETE, at the first opcode or field the player
/// would abort on (the final row carries `is_supported = false` and names
/// the fault), or at the end of the buffer.
#[must_use]
pub fn disassemble(stream: &[u8]) -> Vec<ListingRow> {
    let mut reader = StreamReader::new(stream);
    let mut dr_size = 0u32;
    let mut rows = Vec::new();

    while reader.remaining() > 0 {
        let offset = reader.position();
        let Ok(opcode) = reader.read_u8() else {
            break;
        };

        let Some(instruction) = classify_opcode(opcode) else {
            let mnemonic = reserved_mnemonic(opcode)
                .map_or_else(|| format!(".byte 0x{opcode:02X}"), String::from);
            rows.push(ListingRow {
                offset,
                len_bytes: reader.position() - offset,
                mnemonic,
                operands: format!("<{}>", FaultCode::UnsupportedInstruction),
                is_supported: false,
            });
            break;
        };

        match render_operands(&mut reader, instruction, &mut dr_size) {
            Ok(operands) => {
                rows.push(ListingRow {
                    offset,
                    len_bytes: reader.position() - offset,
                    mnemonic: instruction.mnemonic().to_string(),
                    operands,
                    is_supported: true,
                });
                if instruction == Instruction::Complete {
                    break;
                }
            }
            Err(cause) => {
                rows.push(ListingRow {
                    offset,
                    len_bytes: reader.position() - offset,
                    mnemonic: instruction.mnemonic().to_string(),
                    operands: format!("<{cause}>"),
                    is_supported: false,
                });
                break;
            }
        }
    }

    rows
}

#[allow(clippy::cast_possible_truncation)]
const fn dr_bits(dr_size: u32) -> usize {
    dr_size as usize
}

fn render_operands(
    reader: &mut StreamReader<'_>,
    instruction: Instruction,
    dr_size: &mut u32,
) -> Result<String, FaultCode> {
    Ok(match instruction {
        Instruction::Complete => String::new(),
        Instruction::TdoMask => reader.read_bits(dr_bits(*dr_size))?.to_string(),
        Instruction::ShiftIr => {
            let length = reader.read_u8()?;
            reader.read_bits(usize::from(length))?.to_string()
        }
        Instruction::RunTest => reader.read_u32()?.to_string(),
        Instruction::Repeat => reader.read_u8()?.to_string(),
        Instruction::DrSize => {
            *dr_size = reader.read_u32()?;
            dr_size.to_string()
        }
        Instruction::ShiftDrTdo => {
            let tdi = reader.read_bits(dr_bits(*dr_size))?;
            let expected = reader.read_bits(dr_bits(*dr_size))?;
            format!("{tdi} {expected}")
        }
        Instruction::GotoState => reader.read_state()?.to_string(),
        Instruction::EndIr => end_state(reader.read_u8()?, TapState::PauseIr)?.to_string(),
        Instruction::EndDr => end_state(reader.read_u8()?, TapState::PauseDr)?.to_string(),
        Instruction::Wait => {
            let wait_state = reader.read_state()?;
            let end = reader.read_state()?;
            let amount = reader.read_u32()?;
            format!("{wait_state} {end} {amount}")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::disassemble;

    #[test]
    fn listing_renders_a_representative_stream() {
        let stream = [
            0x07, 0x20, // XREPEAT 32
            0x08, 0x00, 0x00, 0x00, 0x08, // XSDRSIZE 8
            0x01, 0xFF, // XTDOMASK 8'hFF
            0x02, 0x05, 0x0B, // XSIR 5'h0B
            0x09, 0xA5, 0x3C, // XSDRTDO 8'hA5 8'h3C
            0x13, 0x00, // XENDIR Run-Test/Idle
            0x17, 0x01, 0x01, 0x00, 0x00, 0x00, 0x64, // XWAIT
            0x00, // XCOMPLETE
        ];

        let rows = disassemble(&stream);
        let rendered: Vec<String> = rows
            .iter()
            .map(|row| format!("{} {}", row.mnemonic, row.operands).trim_end().to_string())
            .collect();

        assert_eq!(
            rendered,
            [
                "XREPEAT 32",
                "XSDRSIZE 8",
                "XTDOMASK 8'hFF",
                "XSIR 5'h0B",
                "XSDRTDO 8'hA5 8'h3C",
                "XENDIR Run-Test/Idle",
                "XWAIT Run-Test/Idle Run-Test/Idle 100",
                "XCOMPLETE",
            ]
        );
        assert!(rows.iter().all(|row| row.is_supported));
    }

    #[test]
    fn rows_carry_offsets_and_encoded_lengths() {
        let stream = [0x08, 0x00, 0x00, 0x00, 0x10, 0x00];
        let rows = disassemble(&stream);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].offset, rows[0].len_bytes), (0, 5));
        assert_eq!((rows[1].offset, rows[1].len_bytes), (5, 1));
    }

    #[test]
    fn listing_stops_at_a_reserved_opcode_with_its_historical_name() {
        let stream = [0x07, 0x20, 0x03, 0x00];
        let rows = disassemble(&stream);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].mnemonic, "XSDR");
        assert!(!rows[1].is_supported);
    }

    #[test]
    fn listing_renders_unnamed_opcodes_as_raw_bytes() {
        let rows = disassemble(&[0xAB]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mnemonic, ".byte 0xAB");
        assert!(!rows[0].is_supported);
    }

    #[test]
    fn truncated_fields_terminate_the_listing() {
        let stream = [0x08, 0x00, 0x00]; // XSDRSIZE missing two bytes
        let rows = disassemble(&stream);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mnemonic, "XSDRSIZE");
        assert!(!rows[0].is_supported);
        assert!(rows[0].operands.contains("truncated"));
    }

    #[test]
    fn empty_stream_yields_no_rows() {
        assert!(disassemble(&[]).is_empty());
    }
}
