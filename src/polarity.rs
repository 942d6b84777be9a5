//! Polarity labels and the vid → polarity map shared by all expansion engines.
//!
//! Invariants:
//! - A [`PolarityMap`] only ever holds the three real classes; there is no
//!   sentinel variant, the class count lives in [`POLARITY_COUNT`].
//! - Ordinals returned by [`Polarity::index`] double as indices into per-class
//!   arrays and centroid columns; [`Polarity::from_index`] is the checked
//!   inverse and panics outside the class range.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Column index of a word vector in the embedding matrix; primary key for all
/// per-word data.
pub type Vid = usize;

/// Number of polarity classes. Per-class arrays are indexed by
/// [`Polarity::index`].
pub const POLARITY_COUNT: usize = 3;

/// The label being propagated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    /// All classes in ordinal order; centroid columns and per-class arrays
    /// follow this order positionally.
    pub const ALL: [Polarity; POLARITY_COUNT] =
        [Polarity::Positive, Polarity::Negative, Polarity::Neutral];

    /// Ordinal used as a per-class array / centroid-column index.
    pub fn index(self) -> usize {
        match self {
            Polarity::Positive => 0,
            Polarity::Negative => 1,
            Polarity::Neutral => 2,
        }
    }

    /// Checked inverse of [`Polarity::index`].
    ///
    /// Panics on ordinals outside `0..POLARITY_COUNT`; no code path can treat
    /// a class count as a real class.
    pub fn from_index(idx: usize) -> Polarity {
        match idx {
            0 => Polarity::Positive,
            1 => Polarity::Negative,
            2 => Polarity::Neutral,
            _ => panic!("polarity ordinal out of range: {}", idx),
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Polarity::Positive => write!(f, "positive"),
            Polarity::Negative => write!(f, "negative"),
            Polarity::Neutral => write!(f, "neutral"),
        }
    }
}

/// Mapping from vector id to polarity: the seed set on input, the expanded
/// lexicon on output. Caller-owned; every engine extends it in place and
/// never removes or overwrites an entry within a call.
pub type PolarityMap = HashMap<Vid, Polarity>;
