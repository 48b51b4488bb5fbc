//! Research findings and strategic hypotheses.

/// A candidate strategic explanation surfaced by research.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    pub text: String,
    pub rationale: String,
    pub ai_opportunity: String,
}

impl Hypothesis {
    pub fn new(
        text: impl Into<String>,
        rationale: impl Into<String>,
        ai_opportunity: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            rationale: rationale.into(),
            ai_opportunity: ai_opportunity.into(),
        }
    }
}

/// Output of the pre-engagement analysis call. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResearchBundle {
    findings: Vec<String>,
    hypotheses: Vec<Hypothesis>,
}

impl ResearchBundle {
    pub fn new(findings: Vec<String>, hypotheses: Vec<Hypothesis>) -> Self {
        Self {
            findings,
            hypotheses,
        }
    }

    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    /// Candidate set for selection, in the order research returned them.
    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }
}
