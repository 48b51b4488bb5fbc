//! ROI module - schema-driven calculator forms and result rendering.
//!
//! - `schema` - validated declarative calculator schema
//! - `form` - schema (or default) to field descriptors, and submission validation
//! - `result` - tagged calculator results
//! - `render` - display metrics for a result
//! - `currency` - currency and number formatting

mod currency;
mod errors;
mod form;
mod render;
mod result;
mod schema;

pub use currency::{fixed, format_currency, group_thousands, title_case};
pub use errors::RoiError;
pub use form::{
    group_rows, CatalogRoiInput, DefaultRoiInput, FieldDescriptor, FormLayout, FormMode,
    InputKind, RoiFormEngine, RoiSubmission, CURRENCY_SCALE, IMPROVEMENT_FACTORS,
};
pub use render::{ComparisonRow, Metric, RenderedRoi, RoiBand, RoiResultRenderer};
pub use result::{CatalogRoiResult, DefaultRoiResult, RoiResult};
pub use schema::{RoiSchema, VariableKind, VariableSpec};
