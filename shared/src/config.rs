use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

pub const DEFAULT_MIN_WIDTH: u32 = 1;
pub const DEFAULT_MAX_WIDTH: u32 = 20;
pub const DEFAULT_WIDTH: u32 = 2;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
}

/// Board-wide options fixed at mount time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    pub background: Rgb,
    pub min_width: u32,
    pub max_width: u32,
    /// Upper bound on stored undo snapshots. `None` keeps every snapshot.
    /// When set, the oldest snapshots are evicted first.
    pub max_history: Option<NonZeroUsize>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            max_history: None,
        }
    }
}

impl BoardConfig {
    pub fn clamp_width(&self, width: u32) -> u32 {
        let min = self.min_width.max(1);
        let max = self.max_width.max(min);
        width.clamp(min, max)
    }
}

/// User-facing stroke settings. Read once when a stroke starts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct StrokeConfig {
    pub tool: Tool,
    pub color: Rgb,
    pub width: u32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: Rgb::BLACK,
            width: DEFAULT_WIDTH,
        }
    }
}

impl StrokeConfig {
    /// Resolves the paint for a new stroke. The eraser paints with the
    /// background color at twice the configured width.
    pub fn resolve(&self, background: Rgb) -> StrokeStyle {
        match self.tool {
            Tool::Pen => StrokeStyle {
                color: self.color,
                width: self.width as f32,
            },
            Tool::Eraser => StrokeStyle {
                color: background,
                width: self.width.saturating_mul(2) as f32,
            },
        }
    }
}

/// Effective paint of one stroke. Caps and joins are always round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgb,
    pub width: f32,
}
