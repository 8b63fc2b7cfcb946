// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::types::CompressionLevel;

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Compression level preselected on tools that support it.
    pub default_compression: CompressionLevel,
    /// Tuning for the organize-pages drag grid.
    pub reorder: ReorderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_compression: CompressionLevel::Medium,
            reorder: ReorderConfig::default(),
        }
    }
}

/// Tunables for drag-to-reorder: commit hysteresis and edge auto-scroll.
///
/// Defaults are tuned for a typical laptop screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// A move commits only when the pointer is closer to the target tile
    /// centre than `commit_ratio * max(width, height)` of that tile.
    pub commit_ratio: f64,
    /// Height of the auto-scroll trigger band at the top and bottom of the
    /// viewport, in CSS pixels.
    pub edge_band_px: f64,
    /// Smallest non-zero scroll speed once the band is entered (px/frame).
    pub min_scroll_speed: f64,
    /// Scroll speed with the pointer on the viewport edge (px/frame).
    pub max_scroll_speed: f64,
    /// Interval between scroll frames for hosts without a display clock.
    pub frame_interval_ms: u64,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            commit_ratio: 0.75,
            edge_band_px: 100.0,
            min_scroll_speed: 2.0,
            max_scroll_speed: 20.0,
            frame_interval_ms: 16,
        }
    }
}

impl ReorderConfig {
    /// Clamp hand-edited values back into a usable range.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 { value } else { fallback }
        };

        let commit_ratio = pick(self.commit_ratio, defaults.commit_ratio);
        let edge_band_px = pick(self.edge_band_px, defaults.edge_band_px);
        let max_scroll_speed = pick(self.max_scroll_speed, defaults.max_scroll_speed);
        let min_scroll_speed = pick(self.min_scroll_speed, defaults.min_scroll_speed)
            .min(max_scroll_speed);

        Self {
            commit_ratio,
            edge_band_px,
            min_scroll_speed,
            max_scroll_speed,
            frame_interval_ms: self.frame_interval_ms.max(1),
        }
    }
}
