//! ROI result renderer.
//!
//! Produces display metrics for either calculator's result. Matching on the
//! tagged [`RoiResult`] is the only place the two shapes diverge.

use super::currency::{fixed, format_currency, title_case};
use super::result::{CatalogRoiResult, DefaultRoiResult, RoiResult};

/// Variables that are calculator cost inputs, not business drivers.
const HIDDEN_VARIABLES: [&str; 2] = ["implementation_cost", "ongoing_cost"];

const ACCURACY_SEPARATOR: &str = " → ";

/// Band of the headline ROI percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiBand {
    /// Above 200%.
    Favorable,
    /// Above 100%, up to and including 200%.
    Caution,
    /// 100% or less.
    Unfavorable,
}

impl RoiBand {
    pub fn from_percentage(roi_percentage: f64) -> Self {
        if roi_percentage > 200.0 {
            RoiBand::Favorable
        } else if roi_percentage > 100.0 {
            RoiBand::Caution
        } else {
            RoiBand::Unfavorable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

impl Metric {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// "Without AI vs With AI" row of the default result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub left: String,
    pub separator: &'static str,
    pub right: String,
}

/// Everything needed to draw one ROI result panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRoi {
    pub heading: &'static str,
    pub band: RoiBand,
    /// Total ROI, then the benefit, period and NPV metrics.
    pub metrics: Vec<Metric>,
    pub comparison: Vec<ComparisonRow>,
    /// (display name, display value) for catalog results.
    pub variables: Vec<(String, String)>,
    pub summary: String,
}

impl RenderedRoi {
    pub fn metric(&self, label: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.value.as_str())
    }
}

pub struct RoiResultRenderer;

impl RoiResultRenderer {
    pub fn render(result: &RoiResult) -> RenderedRoi {
        match result {
            RoiResult::Default(r) => Self::render_default(r),
            RoiResult::Catalog(r) => Self::render_catalog(r),
        }
    }

    fn render_default(r: &DefaultRoiResult) -> RenderedRoi {
        let (accuracy_before, accuracy_after) = r
            .accuracy_improvement
            .split_once(ACCURACY_SEPARATOR)
            .unwrap_or((r.accuracy_improvement.as_str(), r.accuracy_improvement.as_str()));

        let summary = format!(
            "This {} project delivers {}% ROI with a payback period of {} months. \
             The initiative will save {} annually while improving {} accuracy to {} \
             and achieving {} processing speed.",
            r.project_title,
            fixed(r.roi_percentage, 0),
            fixed(r.payback_months, 1),
            format_currency(r.annual_savings),
            accuracy_before,
            accuracy_after,
            r.speed_improvement,
        );

        RenderedRoi {
            heading: "ROI Analysis Results",
            band: RoiBand::from_percentage(r.roi_percentage),
            metrics: vec![
                Metric::new("Total ROI", format!("{}%", fixed(r.roi_percentage, 1))),
                Metric::new("Annual Savings", format_currency(r.annual_savings)),
                Metric::new("Payback Period", format!("{} months", fixed(r.payback_months, 1))),
                Metric::new("3-Year NPV", format_currency(r.three_year_npv)),
            ],
            comparison: vec![
                ComparisonRow {
                    label: "Annual Cost:",
                    left: format_currency(r.current_annual_cost),
                    separator: "→",
                    right: format_currency(r.ai_annual_cost),
                },
                ComparisonRow {
                    label: "Performance:",
                    left: r.accuracy_improvement.clone(),
                    separator: "|",
                    right: r.speed_improvement.clone(),
                },
            ],
            variables: Vec::new(),
            summary,
        }
    }

    fn render_catalog(r: &CatalogRoiResult) -> RenderedRoi {
        // zero breakeven is treated the same as absent
        let breakeven = r.breakeven_months.filter(|m| *m != 0.0);

        let breakeven_clause = breakeven
            .map(|m| format!(" with a breakeven period of {} months", fixed(m, 1)))
            .unwrap_or_default();
        let summary = format!(
            "This project delivers {}% ROI{}. The implementation generates {} in annual \
             benefits with a 3-year NPV of {}.",
            fixed(r.roi_percentage, 0),
            breakeven_clause,
            format_currency(r.annual_benefit),
            format_currency(r.three_year_npv),
        );

        let variables = r
            .variables_used
            .iter()
            .filter(|(name, _)| !HIDDEN_VARIABLES.contains(&name.as_str()))
            .map(|(name, value)| (title_case(name), Self::variable_value(*value)))
            .collect();

        RenderedRoi {
            heading: "Project-Specific ROI Analysis",
            band: RoiBand::from_percentage(r.roi_percentage),
            metrics: vec![
                Metric::new("Total ROI", format!("{}%", fixed(r.roi_percentage, 1))),
                Metric::new("Annual Benefit", format_currency(r.annual_benefit)),
                Metric::new(
                    "Breakeven Period",
                    breakeven
                        .map(|m| format!("{} months", fixed(m, 1)))
                        .unwrap_or_else(|| "N/A".to_string()),
                ),
                Metric::new("3-Year NPV", format_currency(r.three_year_npv)),
            ],
            comparison: Vec::new(),
            variables,
            summary,
        }
    }

    /// Currency formatting applies by magnitude alone, whatever the declared type.
    fn variable_value(value: f64) -> String {
        if value >= 1000.0 {
            format_currency(value)
        } else {
            value.to_string()
        }
    }
}
