//! IEEE 1149.1 TAP controller states with their XSVF wire encoding.

use std::fmt;

/// The sixteen TAP controller states.
///
/// Discriminants are the XSTATE/XWAIT wire encoding and are part of the
/// stream contract: a state byte is reinterpreted numerically, so these
/// values must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum TapState {
    /// Test-Logic-Reset
    TestLogicReset = 0x00,
    /// Run-Test/Idle
    RunTestIdle = 0x01,
    /// Select-DR-Scan
    SelectDrScan = 0x02,
    /// Capture-DR
    CaptureDr = 0x03,
    /// Shift-DR
    ShiftDr = 0x04,
    /// Exit1-DR
    Exit1Dr = 0x05,
    /// Pause-DR
    PauseDr = 0x06,
    /// Exit2-DR
    Exit2Dr = 0x07,
    /// Update-DR
    UpdateDr = 0x08,
    /// Select-IR-Scan
    SelectIrScan = 0x09,
    /// Capture-IR
    CaptureIr = 0x0A,
    /// Shift-IR
    ShiftIr = 0x0B,
    /// Exit1-IR
    Exit1Ir = 0x0C,
    /// Pause-IR
    PauseIr = 0x0D,
    /// Exit2-IR
    Exit2Ir = 0x0E,
    /// Update-IR
    UpdateIr = 0x0F,
}

impl TapState {
    /// Converts a wire byte into a TAP state.
    ///
    /// `None` means the byte is outside the defined `0x00..=0x0F` set.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::TestLogicReset),
            0x01 => Some(Self::RunTestIdle),
            0x02 => Some(Self::SelectDrScan),
            0x03 => Some(Self::CaptureDr),
            0x04 => Some(Self::ShiftDr),
            0x05 => Some(Self::Exit1Dr),
            0x06 => Some(Self::PauseDr),
            0x07 => Some(Self::Exit2Dr),
            0x08 => Some(Self::UpdateDr),
            0x09 => Some(Self::SelectIrScan),
            0x0A => Some(Self::CaptureIr),
            0x0B => Some(Self::ShiftIr),
            0x0C => Some(Self::Exit1Ir),
            0x0D => Some(Self::PauseIr),
            0x0E => Some(Self::Exit2Ir),
            0x0F => Some(Self::UpdateIr),
            _ => None,
        }
    }

    /// Converts a TAP state to its wire byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Stable display name, matching common SVF usage.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TestLogicReset => "Test-Logic-Reset",
            Self::RunTestIdle => "Run-Test/Idle",
            Self::SelectDrScan => "Select-DR-Scan",
            Self::CaptureDr => "Capture-DR",
            Self::ShiftDr => "Shift-DR",
            Self::Exit1Dr => "Exit1-DR",
            Self::PauseDr => "Pause-DR",
            Self::Exit2Dr => "Exit2-DR",
            Self::UpdateDr => "Update-DR",
            Self::SelectIrScan => "Select-IR-Scan",
            Self::CaptureIr => "Capture-IR",
            Self::ShiftIr => "Shift-IR",
            Self::Exit1Ir => "Exit1-IR",
            Self::PauseIr => "Pause-IR",
            Self::Exit2Ir => "Exit2-IR",
            Self::UpdateIr => "Update-IR",
        }
    }
}

impl fmt::Display for TapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::TapState;

    #[test]
    fn wire_encoding_roundtrip_is_bijective() {
        for value in 0x00u8..=0x0F {
            let state = TapState::from_u8(value).expect("defined state byte");
            assert_eq!(state.as_u8(), value);
        }
    }

    #[test]
    fn out_of_range_bytes_are_rejected() {
        assert!(TapState::from_u8(0x10).is_none());
        assert!(TapState::from_u8(0x80).is_none());
        assert!(TapState::from_u8(0xFF).is_none());
    }

    #[test]
    fn ordinals_match_the_stream_contract() {
        assert_eq!(TapState::TestLogicReset.as_u8(), 0x00);
        assert_eq!(TapState::RunTestIdle.as_u8(), 0x01);
        assert_eq!(TapState::PauseDr.as_u8(), 0x06);
        assert_eq!(TapState::PauseIr.as_u8(), 0x0D);
        assert_eq!(TapState::UpdateIr.as_u8(), 0x0F);
    }

    #[test]
    fn display_uses_stable_names() {
        assert_eq!(TapState::RunTestIdle.to_string(), "Run-Test/Idle");
        assert_eq!(TapState::Exit2Ir.to_string(), "Exit2-IR");
    }
}
