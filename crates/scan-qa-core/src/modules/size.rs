//! Size tier classification of the short edge.

use crate::domain::{Finding, GrayRaster, Outcome, QualityCheck, SizeTier, SizeTierOptions};

/// Grades a short edge against the configured tiers.
///
/// Produces at most one of a reason (`reject`, `unknown`) or a warning
/// (`warn`); `pass` and `excellent` produce neither.
#[must_use]
pub fn classify_size_tier(short_edge: u32, tiers: &SizeTierOptions) -> Outcome<SizeTier> {
    if short_edge == 0 {
        return Outcome::measured(SizeTier::Unknown).with_reason(Some(Finding::SizeUnavailable));
    }

    if short_edge < tiers.reject_below {
        Outcome::measured(SizeTier::Reject).with_reason(Some(Finding::SizeTooSmall(short_edge)))
    } else if short_edge < tiers.warn_below {
        Outcome::measured(SizeTier::Warn).with_warning(Some(Finding::SizeLow(short_edge)))
    } else if short_edge >= tiers.excellent_at {
        Outcome::measured(SizeTier::Excellent)
    } else {
        Outcome::measured(SizeTier::Pass)
    }
}

/// Size tier check over the raster's declared dimensions.
#[derive(Debug, Clone, Default)]
pub struct SizeTierCheck {
    tiers: SizeTierOptions,
}

impl SizeTierCheck {
    /// Creates a size tier check with the given cut-offs.
    #[must_use]
    pub const fn new(tiers: SizeTierOptions) -> Self {
        Self { tiers }
    }
}

impl QualityCheck for SizeTierCheck {
    type Metrics = SizeTier;

    fn name(&self) -> &'static str {
        "size"
    }

    fn analyze(&self, raster: &GrayRaster<'_>) -> Outcome<SizeTier> {
        classify_size_tier(raster.short_edge(), &self.tiers)
    }
}
