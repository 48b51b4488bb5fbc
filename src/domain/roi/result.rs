//! ROI calculation results.
//!
//! The two calculators answer with differently shaped results. The boundary
//! tags each response as it arrives; everything past the boundary matches
//! on [`RoiResult`] and never inspects field presence.

/// Result of the fixed default calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultRoiResult {
    pub project_title: String,
    pub roi_percentage: f64,
    pub annual_savings: f64,
    pub payback_months: f64,
    pub three_year_npv: f64,
    pub current_annual_cost: f64,
    pub ai_annual_cost: f64,
    /// e.g. "80.0% → 92.0%"
    pub accuracy_improvement: String,
    /// e.g. "2.5x faster"
    pub speed_improvement: String,
}

/// Result of a catalog calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRoiResult {
    pub roi_percentage: f64,
    pub annual_benefit: f64,
    pub breakeven_months: Option<f64>,
    pub three_year_npv: f64,
    /// Inputs the calculator used, in the order it reported them.
    pub variables_used: Vec<(String, f64)>,
}

/// Tagged ROI result.
#[derive(Debug, Clone, PartialEq)]
pub enum RoiResult {
    Default(DefaultRoiResult),
    Catalog(CatalogRoiResult),
}
