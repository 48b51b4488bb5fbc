//! Discovery phase state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// The four mutually exclusive top-level phases of a discovery session.
///
/// Phases advance strictly forward one step at a time. Any phase may step
/// back to the one before it, or restart at `CompanyInput`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for a company name.
    #[default]
    CompanyInput,

    /// Name submitted; showing the validation outcome.
    Validating,

    /// Company details, research findings and hypothesis selection.
    Researching,

    /// Recommended projects and per-project ROI.
    Results,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::CompanyInput,
        Phase::Validating,
        Phase::Researching,
        Phase::Results,
    ];

    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::CompanyInput => Some(Phase::Validating),
            Phase::Validating => Some(Phase::Researching),
            Phase::Researching => Some(Phase::Results),
            Phase::Results => None,
        }
    }

    pub fn prior(&self) -> Option<Phase> {
        match self {
            Phase::CompanyInput => None,
            Phase::Validating => Some(Phase::CompanyInput),
            Phase::Researching => Some(Phase::Validating),
            Phase::Results => Some(Phase::Researching),
        }
    }

    /// Which of the four containers is shown, in [`Phase::ALL`] order.
    ///
    /// Exactly one entry is `true`.
    pub fn visibility(&self) -> [bool; 4] {
        Phase::ALL.map(|container| container == *self)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::CompanyInput => "Company Input",
            Phase::Validating => "Validation",
            Phase::Researching => "Research",
            Phase::Results => "Results",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl StateMachine for Phase {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.next() == Some(*target)
            || self.prior() == Some(*target)
            // New analysis
            || (*target == Phase::CompanyInput && *self != Phase::CompanyInput)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        Phase::ALL
            .into_iter()
            .filter(|target| self.can_transition_to(target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_phase_is_company_input() {
        assert_eq!(Phase::default(), Phase::CompanyInput);
    }

    #[test]
    fn phases_advance_one_step_at_a_time() {
        assert!(Phase::CompanyInput.can_transition_to(&Phase::Validating));
        assert!(Phase::Validating.can_transition_to(&Phase::Researching));
        assert!(Phase::Researching.can_transition_to(&Phase::Results));

        assert!(!Phase::CompanyInput.can_transition_to(&Phase::Researching));
        assert!(!Phase::Validating.can_transition_to(&Phase::Results));
    }

    #[test]
    fn back_goes_to_the_immediately_prior_phase_only() {
        assert!(Phase::Results.can_transition_to(&Phase::Researching));
        assert!(!Phase::Results.can_transition_to(&Phase::Validating));
    }

    #[test]
    fn every_later_phase_can_restart() {
        for phase in [Phase::Validating, Phase::Researching, Phase::Results] {
            assert!(phase.can_transition_to(&Phase::CompanyInput));
        }
        assert!(!Phase::CompanyInput.can_transition_to(&Phase::CompanyInput));
    }

    #[test]
    fn valid_transitions_match_can_transition_to() {
        assert_eq!(
            Phase::Researching.valid_transitions(),
            vec![Phase::CompanyInput, Phase::Validating, Phase::Results]
        );
        assert_eq!(Phase::CompanyInput.valid_transitions(), vec![Phase::Validating]);
        assert!(!Phase::Results.is_terminal());
    }

    #[test]
    fn exactly_one_container_is_visible() {
        for phase in Phase::ALL {
            let shown = phase.visibility().iter().filter(|v| **v).count();
            assert_eq!(shown, 1);
        }
        assert_eq!(Phase::Researching.visibility(), [false, false, true, false]);
    }

    #[test]
    fn phases_order_by_workflow_position() {
        assert!(Phase::CompanyInput < Phase::Validating);
        assert!(Phase::Researching < Phase::Results);
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&Phase::CompanyInput).unwrap();
        assert_eq!(json, "\"company_input\"");
    }
}
