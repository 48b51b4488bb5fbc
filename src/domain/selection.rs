//! Hypothesis selection.
//!
//! Tracks which hypothesis checkboxes are checked. The selected set is
//! rebuilt from the control states on every toggle, never patched in place,
//! so it cannot drift from what the controls show.

use crate::domain::company::Hypothesis;
use crate::domain::foundation::ValidationError;

/// The set of checked hypothesis texts, unique by text, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HypothesisSelection {
    texts: Vec<String>,
}

impl HypothesisSelection {
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.texts.iter().any(|t| t == text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Checkbox {
    text: String,
    checked: bool,
}

/// Checkbox states for one research bundle plus the derived selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionManager {
    controls: Vec<Checkbox>,
    selection: HypothesisSelection,
}

impl SelectionManager {
    /// One unchecked control per hypothesis.
    pub fn new(hypotheses: &[Hypothesis]) -> Self {
        Self {
            controls: hypotheses
                .iter()
                .map(|h| Checkbox {
                    text: h.text.clone(),
                    checked: false,
                })
                .collect(),
            selection: HypothesisSelection::default(),
        }
    }

    /// Flips the checkbox carrying `text` and returns its new state.
    ///
    /// Controls sharing the same text share one selection value, so they
    /// flip together.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if no control carries `text`
    pub fn toggle(&mut self, text: &str) -> Result<bool, ValidationError> {
        let current = self
            .controls
            .iter()
            .find(|c| c.text == text)
            .map(|c| c.checked)
            .ok_or_else(|| {
                ValidationError::invalid_format("hypothesis", format!("unknown hypothesis '{}'", text))
            })?;

        self.set_checked(text, !current)?;
        Ok(!current)
    }

    /// Sets the checkbox carrying `text` to `checked`.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if no control carries `text`
    pub fn set_checked(&mut self, text: &str, checked: bool) -> Result<(), ValidationError> {
        let mut found = false;
        for control in self.controls.iter_mut().filter(|c| c.text == text) {
            control.checked = checked;
            found = true;
        }
        if !found {
            return Err(ValidationError::invalid_format(
                "hypothesis",
                format!("unknown hypothesis '{}'", text),
            ));
        }
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        let mut texts: Vec<String> = Vec::new();
        for control in self.controls.iter().filter(|c| c.checked) {
            if !texts.contains(&control.text) {
                texts.push(control.text.clone());
            }
        }
        self.selection = HypothesisSelection { texts };
    }

    pub fn is_checked(&self, text: &str) -> bool {
        self.controls.iter().any(|c| c.text == text && c.checked)
    }

    pub fn selection(&self) -> &HypothesisSelection {
        &self.selection
    }

    /// The sole gate for advancing to results: at least one hypothesis checked.
    pub fn can_advance(&self) -> bool {
        !self.selection.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hypotheses(texts: &[&str]) -> Vec<Hypothesis> {
        texts
            .iter()
            .map(|t| Hypothesis::new(*t, "because", "automate it"))
            .collect()
    }

    #[test]
    fn empty_selection_disables_advance() {
        let manager = SelectionManager::new(&hypotheses(&["a", "b"]));
        assert!(!manager.can_advance());
    }

    #[test]
    fn checking_one_enables_and_unchecking_all_disables() {
        let mut manager = SelectionManager::new(&hypotheses(&["a", "b"]));
        assert!(manager.toggle("b").unwrap());
        assert!(manager.can_advance());
        assert!(!manager.toggle("b").unwrap());
        assert!(!manager.can_advance());
    }

    #[test]
    fn selection_follows_display_order_not_click_order() {
        let mut manager = SelectionManager::new(&hypotheses(&["a", "b", "c"]));
        manager.toggle("c").unwrap();
        manager.toggle("a").unwrap();
        assert_eq!(manager.selection().texts(), &["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn duplicate_texts_collapse_to_one_selection_entry() {
        let mut manager = SelectionManager::new(&hypotheses(&["a", "a", "b"]));
        manager.toggle("a").unwrap();
        assert_eq!(manager.selection().len(), 1);
        assert!(manager.selection().contains("a"));
    }

    #[test]
    fn unknown_hypothesis_is_rejected() {
        let mut manager = SelectionManager::new(&hypotheses(&["a"]));
        assert!(manager.toggle("z").is_err());
        assert!(!manager.can_advance());
    }

    proptest! {
        #[test]
        fn advance_gate_matches_any_checked(flips in proptest::collection::vec(0usize..4, 0..20)) {
            let texts = ["w", "x", "y", "z"];
            let mut manager = SelectionManager::new(&hypotheses(&texts));
            for idx in flips {
                manager.toggle(texts[idx]).unwrap();
            }
            let any_checked = texts.iter().any(|t| manager.is_checked(t));
            prop_assert_eq!(manager.can_advance(), any_checked);
            prop_assert_eq!(
                manager.selection().len(),
                texts.iter().filter(|t| manager.is_checked(t)).count()
            );
        }
    }
}
