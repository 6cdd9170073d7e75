use thiserror::Error;

/// Fault classes used for diagnostics aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// The stream encoded something the instruction set does not define.
    Decode,
    /// The stream ended before an instruction's fields did.
    Stream,
    /// The device disagreed with the stream's expectations during a scan.
    Scan,
}

/// Stable fault taxonomy for playback aborts.
///
/// Every fault is fatal to the run: the player latches the first fault,
/// stops interpreting, and leaves any device-side effects already issued
/// as-is. There is no recovery path short of discarding the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FaultCode {
    /// Opcode is reserved, unimplemented, or beyond the instruction table.
    #[error("unsupported or reserved instruction opcode")]
    UnsupportedInstruction = 0x01,
    /// A field read ran past the end of the instruction stream.
    #[error("instruction stream truncated mid-instruction")]
    TruncatedStream = 0x02,
    /// XENDIR/XENDDR carried a selector other than 0 or 1.
    #[error("end-state selector is not 0 or 1")]
    InvalidEndState = 0x03,
    /// A state byte fell outside the defined TAP state encoding.
    #[error("state byte outside the defined TAP state set")]
    InvalidTapState = 0x04,
    /// The TAP driver reported captured TDO diverging from the expected
    /// pattern under the active mask.
    #[error("captured TDO did not match expected pattern")]
    ShiftMismatch = 0x05,
}

impl FaultCode {
    /// Converts a fault code to its stable low-byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a stable low-byte value back into a fault code.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::UnsupportedInstruction),
            0x02 => Some(Self::TruncatedStream),
            0x03 => Some(Self::InvalidEndState),
            0x04 => Some(Self::InvalidTapState),
            0x05 => Some(Self::ShiftMismatch),
            _ => None,
        }
    }

    /// Returns the diagnostics fault class for this fault code.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::UnsupportedInstruction | Self::InvalidEndState | Self::InvalidTapState => {
                FaultClass::Decode
            }
            Self::TruncatedStream => FaultClass::Stream,
            Self::ShiftMismatch => FaultClass::Scan,
        }
    }
}
