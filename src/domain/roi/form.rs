//! ROI form engine.
//!
//! Turns a project into rendering-agnostic input descriptors laid out two
//! per row, and turns submitted raw values back into a typed submission.
//! Projects with a catalog schema get one field per declared variable;
//! projects without one get the fixed six-field default calculator.

use std::collections::HashMap;

use super::errors::RoiError;
use super::schema::{RoiSchema, VariableKind, VariableSpec};
use crate::domain::company::CompanyProfile;
use crate::domain::recommendation::Project;

/// Allowed values of the default calculator's improvement factor.
pub const IMPROVEMENT_FACTORS: [f64; 6] = [1.5, 2.0, 2.5, 3.0, 4.0, 5.0];

/// Multiplier from the "thousands" a currency field collects to absolute units.
pub const CURRENCY_SCALE: f64 = 1000.0;

const FIELDS_PER_ROW: usize = 2;

/// How a field is entered.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    Number,
    /// A fixed choice among numeric options.
    Select(Vec<f64>),
    /// Declared schema type passed through unchanged.
    Other(String),
}

/// Which calculator a form feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Default,
    Catalog,
}

/// One input control, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub input: InputKind,
    pub initial_value: Option<f64>,
    pub placeholder: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub prefix: Option<&'static str>,
    pub suffix: Option<&'static str>,
    pub tooltip: Option<String>,
    pub required: bool,
    /// Factor applied to the parsed value before it is sent onward.
    pub scale: f64,
}

impl FieldDescriptor {
    fn number(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            input: InputKind::Number,
            initial_value: None,
            placeholder: None,
            min: None,
            max: None,
            step: None,
            prefix: None,
            suffix: None,
            tooltip: None,
            required: true,
            scale: 1.0,
        }
    }

    fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    fn bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    fn from_variable(name: &str, spec: &VariableSpec) -> Self {
        let (input, prefix, suffix, scale) = match &spec.kind {
            VariableKind::Currency => (InputKind::Number, Some("$"), Some("K"), CURRENCY_SCALE),
            VariableKind::Number => (InputKind::Number, None, None, 1.0),
            VariableKind::Other(kind) => (InputKind::Other(kind.clone()), None, None, 1.0),
        };
        let default_step = if spec.kind.is_currency() { 100.0 } else { 1.0 };

        Self {
            name: name.to_string(),
            label: spec.label.clone(),
            input,
            initial_value: Some(spec.default),
            placeholder: Some(spec.default.to_string()),
            min: Some(spec.min.unwrap_or(0.0)),
            max: spec.max,
            step: Some(spec.step.unwrap_or(default_step)),
            prefix,
            suffix,
            tooltip: spec.tooltip.clone(),
            required: true,
            scale,
        }
    }

    /// Parses and bounds-checks this field's raw value, then applies `scale`.
    fn accept(&self, values: &HashMap<String, String>) -> Result<f64, RoiError> {
        let invalid = || RoiError::InputInvalid(self.name.clone());

        let raw = values.get(&self.name).map(|v| v.trim()).unwrap_or_default();
        if raw.is_empty() {
            return Err(invalid());
        }
        let value: f64 = raw.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        if self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| value > max) {
            return Err(invalid());
        }
        if let InputKind::Select(options) = &self.input {
            if !options.iter().any(|o| (o - value).abs() < f64::EPSILON) {
                return Err(invalid());
            }
        }
        Ok(value * self.scale)
    }
}

/// Ordered fields, grouped into rows of two.
#[derive(Debug, Clone, PartialEq)]
pub struct FormLayout {
    pub mode: FormMode,
    pub rows: Vec<Vec<FieldDescriptor>>,
    pub submit_label: &'static str,
}

impl FormLayout {
    fn new(mode: FormMode, fields: Vec<FieldDescriptor>) -> Self {
        let submit_label = match mode {
            FormMode::Default => "Calculate ROI",
            FormMode::Catalog => "Calculate Project-Specific ROI",
        };
        Self {
            mode,
            rows: group_rows(fields),
            submit_label,
        }
    }

    /// All fields in declared order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.rows.iter().flatten()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields().find(|f| f.name == name)
    }
}

/// Pairs consecutive items, preserving order; an odd last item sits alone.
pub fn group_rows<T>(items: Vec<T>) -> Vec<Vec<T>> {
    let mut rows = Vec::with_capacity(items.len().div_ceil(FIELDS_PER_ROW));
    let mut row = Vec::with_capacity(FIELDS_PER_ROW);
    for item in items {
        row.push(item);
        if row.len() == FIELDS_PER_ROW {
            rows.push(std::mem::replace(&mut row, Vec::with_capacity(FIELDS_PER_ROW)));
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Input for the default calculator, forwarded verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultRoiInput {
    pub project_title: String,
    pub industry: String,
    pub company_size: String,
    pub current_process_cost: f64,
    pub current_accuracy: f64,
    pub current_processing_time: f64,
    pub expected_improvement: f64,
    pub implementation_cost: f64,
    pub annual_operating_cost: f64,
}

/// Input for a catalog calculator; currency values already in absolute units.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRoiInput {
    pub schema: RoiSchema,
    pub variable_values: Vec<(String, f64)>,
}

impl CatalogRoiInput {
    pub fn value(&self, name: &str) -> Option<f64> {
        self.variable_values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

/// A fully validated ROI form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum RoiSubmission {
    Default(DefaultRoiInput),
    Catalog(CatalogRoiInput),
}

/// Stateless interpreter from projects to forms and back.
pub struct RoiFormEngine;

impl RoiFormEngine {
    /// The form for a project: catalog-driven when it carries a schema.
    pub fn layout(project: &Project) -> FormLayout {
        match project.schema() {
            Some(schema) => Self::schema_layout(schema),
            None => Self::default_layout(),
        }
    }

    pub fn schema_layout(schema: &RoiSchema) -> FormLayout {
        let fields = schema
            .variables()
            .map(|(name, spec)| FieldDescriptor::from_variable(name, spec))
            .collect();
        FormLayout::new(FormMode::Catalog, fields)
    }

    /// The fixed six-field calculator.
    pub fn default_layout() -> FormLayout {
        let improvement = FieldDescriptor {
            input: InputKind::Select(IMPROVEMENT_FACTORS.to_vec()),
            placeholder: Some("Select improvement".to_string()),
            ..FieldDescriptor::number("expected_improvement", "Expected Improvement Factor")
        };

        let fields = vec![
            FieldDescriptor::number("current_process_cost", "Current Monthly Process Cost ($)")
                .placeholder("25000")
                .step(1000.0),
            FieldDescriptor::number("current_accuracy", "Current Accuracy/Efficiency (%)")
                .placeholder("80")
                .bounds(Some(0.0), Some(100.0))
                .step(0.1),
            FieldDescriptor::number("current_processing_time", "Current Processing Time (minutes)")
                .placeholder("30")
                .bounds(Some(1.0), None)
                .step(0.1),
            improvement,
            FieldDescriptor::number("implementation_cost", "Implementation Cost ($)")
                .placeholder("200000")
                .step(10000.0),
            FieldDescriptor::number("annual_operating_cost", "Annual Operating Cost ($)")
                .placeholder("50000")
                .step(1000.0),
        ];
        FormLayout::new(FormMode::Default, fields)
    }

    /// Validates a submission for `project`.
    ///
    /// Every field must parse; one bad field fails the whole submission.
    ///
    /// # Errors
    ///
    /// - `InputInvalid` naming the first field that is missing, unparseable,
    ///   out of bounds, or not an allowed option
    pub fn validate(
        project: &Project,
        company: &CompanyProfile,
        values: &HashMap<String, String>,
    ) -> Result<RoiSubmission, RoiError> {
        match project.schema() {
            Some(schema) => Self::validate_catalog(schema, values).map(RoiSubmission::Catalog),
            None => Self::validate_default(project, company, values).map(RoiSubmission::Default),
        }
    }

    pub fn validate_catalog(
        schema: &RoiSchema,
        values: &HashMap<String, String>,
    ) -> Result<CatalogRoiInput, RoiError> {
        let layout = Self::schema_layout(schema);
        let variable_values = layout
            .fields()
            .map(|field| field.accept(values).map(|v| (field.name.clone(), v)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CatalogRoiInput {
            schema: schema.clone(),
            variable_values,
        })
    }

    fn validate_default(
        project: &Project,
        company: &CompanyProfile,
        values: &HashMap<String, String>,
    ) -> Result<DefaultRoiInput, RoiError> {
        let layout = Self::default_layout();
        let get = |name: &str| -> Result<f64, RoiError> {
            layout
                .field(name)
                .ok_or_else(|| RoiError::InputInvalid(name.to_string()))?
                .accept(values)
        };

        Ok(DefaultRoiInput {
            project_title: project.title.clone(),
            industry: company.industry().to_string(),
            company_size: company.size().to_string(),
            current_process_cost: get("current_process_cost")?,
            current_accuracy: get("current_accuracy")?,
            current_processing_time: get("current_processing_time")?,
            expected_improvement: get("expected_improvement")?,
            implementation_cost: get("implementation_cost")?,
            annual_operating_cost: get("annual_operating_cost")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn schema(raw: serde_json::Value) -> RoiSchema {
        RoiSchema::from_value(&raw).unwrap()
    }

    fn abc_schema() -> RoiSchema {
        schema(json!({"variables": {
            "a": {"label": "A", "type": "number", "default": 10},
            "b": {"label": "B", "type": "currency", "default": 250},
            "c": {"label": "C", "type": "number", "default": 3, "max": 12, "step": 0.5}
        }}))
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn company() -> CompanyProfile {
        CompanyProfile::new("Acme", "Insurance", "large")
    }

    #[test]
    fn three_variables_make_a_pair_then_a_single_row() {
        let layout = RoiFormEngine::schema_layout(&abc_schema());
        let rows: Vec<Vec<&str>> = layout
            .rows
            .iter()
            .map(|r| r.iter().map(|f| f.name.as_str()).collect())
            .collect();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c"]]);
        assert_eq!(layout.mode, FormMode::Catalog);
    }

    #[test]
    fn currency_fields_get_prefix_suffix_and_step_100() {
        let layout = RoiFormEngine::schema_layout(&abc_schema());
        let b = layout.field("b").unwrap();
        assert_eq!(b.input, InputKind::Number);
        assert_eq!(b.prefix, Some("$"));
        assert_eq!(b.suffix, Some("K"));
        assert_eq!(b.step, Some(100.0));
        assert_eq!(b.scale, 1000.0);
    }

    #[test]
    fn number_fields_default_to_step_1_min_0_and_no_max() {
        let layout = RoiFormEngine::schema_layout(&abc_schema());
        let a = layout.field("a").unwrap();
        assert_eq!(a.step, Some(1.0));
        assert_eq!(a.min, Some(0.0));
        assert_eq!(a.max, None);
        assert_eq!(a.initial_value, Some(10.0));
        assert!(a.required);

        let c = layout.field("c").unwrap();
        assert_eq!(c.step, Some(0.5));
        assert_eq!(c.max, Some(12.0));
    }

    #[test]
    fn other_declared_types_pass_through() {
        let layout = RoiFormEngine::schema_layout(&schema(json!({"variables": {
            "rate": {"label": "Rate", "type": "range", "default": 5}
        }})));
        assert_eq!(
            layout.field("rate").unwrap().input,
            InputKind::Other("range".to_string())
        );
    }

    #[test]
    fn project_without_schema_gets_six_default_fields() {
        let layout = RoiFormEngine::layout(&Project::new("Plain"));
        assert_eq!(layout.mode, FormMode::Default);
        let names: Vec<&str> = layout.fields().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "current_process_cost",
                "current_accuracy",
                "current_processing_time",
                "expected_improvement",
                "implementation_cost",
                "annual_operating_cost"
            ]
        );
        assert_eq!(layout.rows.len(), 3);
        assert_eq!(
            layout.field("expected_improvement").unwrap().input,
            InputKind::Select(IMPROVEMENT_FACTORS.to_vec())
        );
    }

    #[test]
    fn currency_value_is_scaled_to_absolute_units() {
        let input = RoiFormEngine::validate_catalog(
            &abc_schema(),
            &values(&[("a", "10"), ("b", "250"), ("c", "3")]),
        )
        .unwrap();
        assert_eq!(input.value("b"), Some(250_000.0));
        assert_eq!(input.value("a"), Some(10.0));
        let order: Vec<&str> = input.variable_values.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn one_unparseable_value_fails_the_whole_submission() {
        let err = RoiFormEngine::validate_catalog(
            &abc_schema(),
            &values(&[("a", "10"), ("b", "lots"), ("c", "3")]),
        )
        .unwrap_err();
        assert_eq!(err, RoiError::InputInvalid("b".to_string()));
    }

    #[test]
    fn missing_value_is_invalid() {
        let err = RoiFormEngine::validate_catalog(&abc_schema(), &values(&[("a", "1"), ("b", "2")]))
            .unwrap_err();
        assert_eq!(err, RoiError::InputInvalid("c".to_string()));
    }

    #[test]
    fn values_outside_bounds_are_invalid() {
        let below_min = RoiFormEngine::validate_catalog(
            &abc_schema(),
            &values(&[("a", "-1"), ("b", "2"), ("c", "3")]),
        );
        assert_eq!(below_min.unwrap_err(), RoiError::InputInvalid("a".to_string()));

        let above_max = RoiFormEngine::validate_catalog(
            &abc_schema(),
            &values(&[("a", "1"), ("b", "2"), ("c", "13")]),
        );
        assert_eq!(above_max.unwrap_err(), RoiError::InputInvalid("c".to_string()));
    }

    #[test]
    fn default_submission_is_forwarded_verbatim() {
        let submission = RoiFormEngine::validate(
            &Project::new("Claims Triage"),
            &company(),
            &values(&[
                ("current_process_cost", "25000"),
                ("current_accuracy", "80"),
                ("current_processing_time", "30"),
                ("expected_improvement", "2.5"),
                ("implementation_cost", "200000"),
                ("annual_operating_cost", "50000"),
            ]),
        )
        .unwrap();

        match submission {
            RoiSubmission::Default(input) => {
                assert_eq!(input.project_title, "Claims Triage");
                assert_eq!(input.industry, "Insurance");
                assert_eq!(input.company_size, "large");
                assert_eq!(input.current_process_cost, 25000.0);
                assert_eq!(input.expected_improvement, 2.5);
                assert_eq!(input.implementation_cost, 200000.0);
            }
            other => panic!("expected default submission, got {:?}", other),
        }
    }

    #[test]
    fn default_improvement_factor_must_be_an_offered_option() {
        let err = RoiFormEngine::validate(
            &Project::new("Claims Triage"),
            &company(),
            &values(&[
                ("current_process_cost", "25000"),
                ("current_accuracy", "80"),
                ("current_processing_time", "30"),
                ("expected_improvement", "7"),
                ("implementation_cost", "200000"),
                ("annual_operating_cost", "50000"),
            ]),
        )
        .unwrap_err();
        assert_eq!(err, RoiError::InputInvalid("expected_improvement".to_string()));
    }

    proptest! {
        #[test]
        fn rows_preserve_order_and_pair_items(len in 0usize..40) {
            let items: Vec<usize> = (0..len).collect();
            let rows = group_rows(items.clone());
            prop_assert_eq!(rows.len(), (len + 1) / 2);
            prop_assert!(rows.iter().all(|r| r.len() == 2 || r.len() == 1));
            prop_assert!(rows.iter().rev().skip(1).all(|r| r.len() == 2));
            let flattened: Vec<usize> = rows.into_iter().flatten().collect();
            prop_assert_eq!(flattened, items);
        }
    }
}
