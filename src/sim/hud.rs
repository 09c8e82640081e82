//! Score and lives presentation
//!
//! Derived display state only. The authoritative counters live on `GameState`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LIVES, SCORE_DIGITS};

/// A digit glyph in the score display (`digit_0`..`digit_9`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Glyph(u8);

impl Glyph {
    /// Glyph for a decimal digit; values above 9 are clamped
    pub fn digit(d: u8) -> Self {
        Self(d.min(9))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Texture id for the renderer
    pub fn id(&self) -> String {
        format!("digit_{}", self.0)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "digit_{}", self.0)
    }
}

/// Zero-padded 5-digit score display. Scores past 99999 roll over.
pub fn render_score(score: u32) -> [Glyph; SCORE_DIGITS] {
    let mut n = score % 10u32.pow(SCORE_DIGITS as u32);
    let mut glyphs = [Glyph::default(); SCORE_DIGITS];
    for slot in glyphs.iter_mut().rev() {
        *slot = Glyph::digit((n % 10) as u8);
        n /= 10;
    }
    glyphs
}

/// Number of life indicators to show; negative counters clamp to zero
pub fn visible_lives(lives: i32) -> usize {
    lives.clamp(0, MAX_LIVES as i32) as usize
}
