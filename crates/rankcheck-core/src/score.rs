//! Engine-native scores and their normalization onto a single total order.
//!
//! Engines report either a centipawn advantage or a forced mate, both
//! relative to the side to move. [`normalize`] folds the two onto one signed
//! integer line so that any two scores compare with plain `<`:
//!
//! ```text
//! mated now < mated in 1 < mated in 5 < -50cp < 0 < +200cp < mate in 5 < mate in 1 < mate given
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// Normalized magnitude of a mate already delivered by the side to move.
///
/// Mate in `n` for the side to move normalizes to `MATE_OFFSET - n`, mated
/// in `n` to `-(MATE_OFFSET - n)`. Every `i32` centipawn value and every
/// `u32` mate distance fits between the two ends.
pub const MATE_OFFSET: i64 = 1 << 40;

// Largest magnitude a centipawn score can normalize to (`i32::MIN`).
const CENTIPAWN_LIMIT: u64 = i32::MIN.unsigned_abs() as u64;

// The slowest mate must still outrank every centipawn value in the same direction.
const _: () = assert!((MATE_OFFSET - u32::MAX as i64) as u64 > CENTIPAWN_LIMIT);

/// A score as an engine reports it, relative to the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeScore {
    /// Material-style advantage in hundredths of a pawn.
    Centipawns(i32),
    /// The side to move mates in this many plies.
    MateIn(u32),
    /// The side to move is mated in this many plies (0 = already mated).
    MatedIn(u32),
    /// The side to move has already delivered mate.
    MateGiven,
}

impl NativeScore {
    /// Convert a floating-point evaluation in pawns to a centipawn score.
    ///
    /// The value is rounded to the nearest centipawn. NaN, infinities and
    /// values beyond the `i32` centipawn range are rejected rather than clamped.
    pub fn from_pawns(pawns: f64) -> Result<NativeScore, ScoreError> {
        if !pawns.is_finite() {
            return Err(ScoreError::NonFinite);
        }
        let centipawns = (pawns * 100.0).round();
        if centipawns < f64::from(i32::MIN) || centipawns > f64::from(i32::MAX) {
            return Err(ScoreError::CentipawnsOutOfRange {
                centipawns: centipawns as i64,
            });
        }
        Ok(NativeScore::Centipawns(centipawns as i32))
    }

    /// Shorthand for [`normalize`].
    #[inline]
    pub fn normalize(self) -> Score {
        normalize(self)
    }
}

impl fmt::Display for NativeScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NativeScore::Centipawns(cp) => write!(f, "cp {cp}"),
            NativeScore::MateIn(0) | NativeScore::MateGiven => write!(f, "mate given"),
            NativeScore::MateIn(plies) => write!(f, "mate {plies}"),
            NativeScore::MatedIn(0) => write!(f, "mate 0"),
            NativeScore::MatedIn(plies) => write!(f, "mate -{plies}"),
        }
    }
}

impl FromStr for NativeScore {
    type Err = ScoreError;

    /// Parse the `cp <n>` / `mate <n>` form engines print after `score`.
    ///
    /// A leading `score` token is accepted. `mate 0` and negative mate
    /// distances mean the side to move is mated; `mate given` means the side
    /// to move has already mated.
    fn from_str(text: &str) -> Result<NativeScore, ScoreError> {
        let malformed = || ScoreError::MalformedScore {
            text: text.to_string(),
        };

        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.first() == Some(&"score") {
            tokens.remove(0);
        }
        let &[kind, value] = tokens.as_slice() else {
            return Err(malformed());
        };

        match kind {
            "cp" => value
                .parse::<i32>()
                .map(NativeScore::Centipawns)
                .map_err(|_| malformed()),
            "mate" if value == "given" => Ok(NativeScore::MateGiven),
            "mate" => {
                let plies = value.parse::<i32>().map_err(|_| malformed())?;
                if plies > 0 {
                    Ok(NativeScore::MateIn(plies.unsigned_abs()))
                } else {
                    Ok(NativeScore::MatedIn(plies.unsigned_abs()))
                }
            }
            _ => Err(malformed()),
        }
    }
}

/// A normalized score: one signed integer per outcome, totally ordered.
///
/// Centipawn scores keep their value. Mate scores sit beyond every `i32`
/// centipawn value, with `MATE_OFFSET` as the supremum. Only [`normalize`]
/// constructs one, so the value always lies within `±MATE_OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Score(i64);

impl Score {
    /// Dead equal.
    pub const ZERO: Score = Score(0);

    /// Mate already delivered by the side to move.
    pub const MAX: Score = Score(MATE_OFFSET);

    /// The side to move is already mated.
    pub const MIN: Score = Score(-MATE_OFFSET);

    /// Raw normalized value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// True when the score favors the side to move or is level.
    #[inline]
    pub const fn is_non_negative(self) -> bool {
        self.0 >= 0
    }

    /// True when the score encodes a forced mate for either side.
    #[inline]
    pub const fn is_mate(self) -> bool {
        self.0.unsigned_abs() > CENTIPAWN_LIMIT
    }

    /// Distance to mate in plies, if this is a mate score.
    pub fn mate_plies(self) -> Option<u32> {
        if !self.is_mate() {
            return None;
        }
        MATE_OFFSET
            .unsigned_abs()
            .checked_sub(self.0.unsigned_abs())
            .and_then(|plies| u32::try_from(plies).ok())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mate_plies() {
            Some(plies) if self.0 > 0 => write!(f, "#+{plies}"),
            Some(plies) => write!(f, "#-{plies}"),
            None => write!(f, "{:+}", self.0),
        }
    }
}

/// Map an engine-native score onto the normalized total order.
///
/// Total over the native domain: every centipawn value and every mate
/// distance has its own normalized value, so nothing is clamped.
pub fn normalize(native: NativeScore) -> Score {
    match native {
        NativeScore::Centipawns(cp) => Score(i64::from(cp)),
        NativeScore::MateIn(plies) => Score(MATE_OFFSET - i64::from(plies)),
        NativeScore::MatedIn(plies) => Score(-(MATE_OFFSET - i64::from(plies))),
        NativeScore::MateGiven => Score::MAX,
    }
}
