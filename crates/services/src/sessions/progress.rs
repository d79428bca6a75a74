/// Aggregated view of course progress, useful for UI.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseProgress {
    /// 1-based number of the current level.
    pub level_number: usize,
    pub level_count: usize,
    /// Fraction of the current level passed, in `[0, 1]`.
    pub section_ratio: f64,
    pub completed_in_track: usize,
}

impl CourseProgress {
    /// Whole-track percentage including the partial current level, capped at 100.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.level_count == 0 {
            return 0;
        }
        #[allow(clippy::cast_precision_loss)]
        let raw = ((self.level_number.saturating_sub(1)) as f64 + self.section_ratio)
            / self.level_count as f64
            * 100.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = raw.round().clamp(0.0, 100.0) as u8;
        pct
    }
}
