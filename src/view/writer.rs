use crate::view::chart::Plot;
use crate::view::format;
use crate::view::page::{Page, Region, RegionContent};

/// Applies formatted values and chart datasets to page regions.
///
/// Every method is a no-op returning `false` when the target region is not on
/// the page.
#[derive(Debug, Clone)]
pub struct DomWriter {
    page: Page,
}

impl DomWriter {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub fn has(&self, region: Region) -> bool {
        self.page.contains(region)
    }

    pub fn set_text(&self, region: Region, text: impl Into<String>) -> bool {
        let written = self.page.set(region, RegionContent::Text { text: text.into() });
        if !written {
            tracing::trace!(%region, "Region not on page, text dropped");
        }
        written
    }

    /// Render the risk badge. A missing or blank label is replaced by the
    /// default before formatting.
    pub fn set_risk_badge(&self, label: Option<&str>) -> bool {
        let label = format::risk_label(label);
        self.page.set(
            Region::RiskBadge,
            RegionContent::Badge {
                text: format::badge_text(label),
                class: format::badge_class(label),
            },
        )
    }

    /// Replace whatever the chart region showed with `plot`.
    pub fn plot(&self, region: Region, plot: Plot) -> bool {
        let written = self.page.set(region, RegionContent::Chart { plot });
        if !written {
            tracing::trace!(%region, "Region not on page, chart dropped");
        }
        written
    }

    pub fn set_selector(&self, region: Region, value: u32, options: &[u32]) -> bool {
        self.page.set(
            region,
            RegionContent::Selector {
                value,
                options: options.to_vec(),
            },
        )
    }
}
