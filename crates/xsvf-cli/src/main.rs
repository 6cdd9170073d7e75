//! CLI entry point for the xsvf inspection binary.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(test)]
use tempfile as _;

use xsvf_core::{
    disassemble, BitVector, ListingRow, ShiftResult, TapDriver, TapState, XsvfPlayer,
};

const USAGE_TEXT: &str = "\
Usage: xsvf <command> <input>

Commands:
  dump  <input>   Print an instruction listing of an XSVF file
  check <input>   Dry-run an XSVF file and report the playback outcome

Options:
  -h, --help      Show this help message

Examples:
  xsvf dump bitstream.xsvf
  xsvf check bitstream.xsvf
";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Dump(PathBuf),
    Check(PathBuf),
}

#[derive(Debug)]
enum ParseResult {
    Command(Command),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let first = args.next().ok_or_else(|| "missing command".to_string())?;

    if first == "--help" || first == "-h" {
        return Ok(ParseResult::Help);
    }

    let command_str = first.to_string_lossy().to_string();

    let input = match command_str.as_str() {
        "dump" | "check" => parse_input(args)?,
        other => return Err(format!("unknown command: {other}")),
    };

    let command = if command_str == "dump" {
        Command::Dump(input)
    } else {
        Command::Check(input)
    };
    Ok(ParseResult::Command(command))
}

fn parse_input(args: impl Iterator<Item = OsString>) -> Result<PathBuf, String> {
    let mut input: Option<PathBuf> = None;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if input.is_some() {
            return Err("multiple input paths provided".to_string());
        }
        input = Some(PathBuf::from(arg));
    }

    input.ok_or_else(|| "missing input path".to_string())
}

fn format_row(row: &ListingRow) -> String {
    let mut line = format!("{:06X}: {}", row.offset, row.mnemonic);
    if !row.operands.is_empty() {
        line.push(' ');
        line.push_str(&row.operands);
    }
    if !row.is_supported {
        line.push_str(" ; playback aborts here");
    }
    line
}

fn run_dump(input: &Path) -> Result<(), i32> {
    let stream = read_stream(input)?;
    let rows = disassemble(&stream);

    for row in &rows {
        println!("{}", format_row(row));
    }
    println!(
        "{} instructions, {} bytes",
        rows.len(),
        stream.len()
    );

    Ok(())
}

/// Driver that performs no I/O and reports every shift matched.
#[derive(Default)]
struct DryRunTap {
    ir_shifts: u32,
    dr_shifts: u32,
}

impl TapDriver for DryRunTap {
    fn shift_ir(&mut self, _tdi: &BitVector) -> ShiftResult {
        self.ir_shifts += 1;
        ShiftResult::Matched
    }

    fn shift_dr(
        &mut self,
        _tdi: &BitVector,
        _expected: &BitVector,
        _mask: &BitVector,
    ) -> ShiftResult {
        self.dr_shifts += 1;
        ShiftResult::Matched
    }

    fn set_run_test(&mut self, _cycles: u32) {}

    fn set_repeat(&mut self, _count: u8) {}

    fn state(&mut self, _target: TapState) {}

    fn set_end_ir(&mut self, _target: TapState) {}

    fn set_end_dr(&mut self, _target: TapState) {}

    fn wait(&mut self, _wait_state: TapState, _end_state: TapState, _amount: u32) {}
}

fn run_check(input: &Path) -> Result<(), i32> {
    let stream = read_stream(input)?;

    let mut tap = DryRunTap::default();
    let player = XsvfPlayer::new(&stream, &mut tap);

    if player.failed() {
        let offset = player.fault_offset().unwrap_or(0);
        let fault = player
            .fault()
            .map_or_else(String::new, |fault| fault.to_string());
        eprintln!("FAILED at 0x{offset:06X}: {fault}");
        return Err(1);
    }

    println!(
        "OK: {} instructions, {} IR shifts, {} DR shifts",
        player.instructions_retired(),
        tap.ir_shifts,
        tap.dr_shifts
    );
    Ok(())
}

fn read_stream(input: &Path) -> Result<Vec<u8>, i32> {
    fs::read(input).map_err(|error| {
        eprintln!("error: failed to read {}: {error}", input.display());
        1
    })
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Command(Command::Dump(input))) => match run_dump(&input) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Ok(ParseResult::Command(Command::Check(input))) => match run_check(&input) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            if error.starts_with("Usage:") {
                println!("{error}");
            } else {
                eprintln!("error: {error}");
                eprintln!("{USAGE_TEXT}");
            }
            1
        }
    };

    std::process::exit(exit_code);
}
