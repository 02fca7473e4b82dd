use std::fmt;

/// Errors reported by [`encode`](crate::codec::encode) and
/// [`decode`](crate::codec::decode).
///
/// Both kinds are local to one call and fully recoverable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The text contains a character the symbol table does not know.
    /// `position` is the 0-based char index of the first offending character.
    #[error("unsupported character {ch:?} at position {position}")]
    UnsupportedCharacter { ch: char, position: usize },
    /// The digits do not split into base pairs and modifier codes.
    /// `offset` is the 0-based index of the first digit of the bad unit.
    #[error("malformed digit sequence at offset {offset}: {reason}")]
    MalformedDigitSequence {
        offset: usize,
        reason: MalformedReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    NotADigit,
    IncompletePair,
    ColumnOutOfRange,
    UnassignedPair,
    DanglingModifier,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MalformedReason::NotADigit => "not an ASCII digit",
            MalformedReason::IncompletePair => "incomplete digit pair",
            MalformedReason::ColumnOutOfRange => "column digit out of range",
            MalformedReason::UnassignedPair => "no kana assigned to this pair",
            MalformedReason::DanglingModifier => "modifier code with no base to modify",
        };
        f.write_str(msg)
    }
}

impl CodecError {
    pub(crate) fn malformed(offset: usize, reason: MalformedReason) -> Self {
        CodecError::MalformedDigitSequence { offset, reason }
    }
}
