//! Declarative ROI calculator schema.
//!
//! Projects from the catalog carry an `roi_calculator` object whose
//! `variables` map declares the calculator inputs. The schema is validated
//! once, when a recommendations response is received; form generation and
//! submission never see a malformed schema.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::foundation::ValidationError;

/// Declared type of a schema variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableKind {
    Number,
    /// Collected in thousands, forwarded in absolute currency units.
    Currency,
    /// Any other declared input type, passed through to the form unchanged.
    Other(String),
}

impl VariableKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "number" => VariableKind::Number,
            "currency" => VariableKind::Currency,
            other => VariableKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VariableKind::Number => "number",
            VariableKind::Currency => "currency",
            VariableKind::Other(other) => other,
        }
    }

    pub fn is_currency(&self) -> bool {
        matches!(self, VariableKind::Currency)
    }
}

/// One declared calculator input.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpec {
    pub label: String,
    pub kind: VariableKind,
    pub default: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub tooltip: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawVariable {
    label: String,
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    default: f64,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    step: Option<f64>,
    #[serde(default)]
    tooltip: Option<String>,
}

fn default_kind() -> String {
    "number".to_string()
}

/// A validated ROI calculator schema.
///
/// # Invariants
///
/// - at least one variable, each with a non-empty name and label
/// - defaults and bounds are finite, `min <= max` when both are given
/// - `step`, when given, is positive
/// - variable order is the declared order
#[derive(Debug, Clone, PartialEq)]
pub struct RoiSchema {
    variables: Vec<(String, VariableSpec)>,
    /// The calculator object exactly as received; forwarded as `roi_config`.
    config: Value,
}

impl RoiSchema {
    /// Validates a raw `roi_calculator` object.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the object or any variable is malformed
    /// - `OutOfRange` if a default lies outside its bounds
    /// - `EmptyField` if no variables are declared or a label is blank
    pub fn from_value(config: &Value) -> Result<Self, ValidationError> {
        let declared = config
            .get("variables")
            .and_then(Value::as_object)
            .ok_or_else(|| ValidationError::invalid_format("variables", "expected an object"))?;

        if declared.is_empty() {
            return Err(ValidationError::empty_field("variables"));
        }

        let mut variables = Vec::with_capacity(declared.len());
        for (name, raw) in declared {
            let spec = Self::parse_variable(name, raw)?;
            variables.push((name.clone(), spec));
        }

        Ok(Self {
            variables,
            config: config.clone(),
        })
    }

    fn parse_variable(name: &str, raw: &Value) -> Result<VariableSpec, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("variable name"));
        }

        let raw: RawVariable = serde_json::from_value(raw.clone())
            .map_err(|e| ValidationError::invalid_format(name, e.to_string()))?;

        if raw.label.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.label", name)));
        }

        for (what, value) in [("default", Some(raw.default)), ("min", raw.min), ("max", raw.max)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ValidationError::invalid_format(
                    format!("{}.{}", name, what),
                    "must be a finite number",
                ));
            }
        }

        // Inputs without a declared minimum are bounded below by zero.
        let min = raw.min.unwrap_or(0.0);
        let max = raw.max.unwrap_or(f64::INFINITY);
        if min > max {
            return Err(ValidationError::invalid_format(
                format!("{}.min", name),
                format!("{} exceeds max {}", min, max),
            ));
        }
        if raw.default < min || raw.default > max {
            return Err(ValidationError::out_of_range(
                format!("{}.default", name),
                min,
                max,
                raw.default,
            ));
        }

        if let Some(step) = raw.step {
            if !step.is_finite() || step <= 0.0 {
                return Err(ValidationError::invalid_format(
                    format!("{}.step", name),
                    "must be positive",
                ));
            }
        }

        Ok(VariableSpec {
            label: raw.label,
            kind: VariableKind::parse(&raw.kind),
            default: raw.default,
            min: raw.min,
            max: raw.max,
            step: raw.step,
            tooltip: raw.tooltip.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Variables in declared order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &VariableSpec)> {
        self.variables.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn variable(&self, name: &str) -> Option<&VariableSpec> {
        self.variables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// The original calculator object, including fields other than `variables`.
    pub fn config(&self) -> &Value {
        &self.config
    }
}
