//! Recommended AI projects.
//!
//! A recommendations result holds two pools: projects aligned to the
//! selected hypotheses and supplementary filler projects. ROI forms address
//! projects by their position in the pooled list (aligned first, then
//! filler).

use std::collections::HashSet;

use crate::domain::roi::RoiSchema;

/// One recommended project.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub timeline: String,
    pub investment_range: String,
    pub priority: String,
    /// Catalog calculator; `None` means the default calculator applies.
    pub roi_calculator: Option<RoiSchema>,
    pub hypothesis_alignment: Option<String>,
    pub expected_roi: Option<String>,
    pub business_value: Option<String>,
    pub implementation_notes: Option<String>,
}

impl Project {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            timeline: String::new(),
            investment_range: String::new(),
            priority: String::new(),
            roi_calculator: None,
            hypothesis_alignment: None,
            expected_roi: None,
            business_value: None,
            implementation_notes: None,
        }
    }

    pub fn with_schema(mut self, schema: RoiSchema) -> Self {
        self.roi_calculator = Some(schema);
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn schema(&self) -> Option<&RoiSchema> {
        self.roi_calculator.as_ref()
    }
}

/// Which pool a project came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPool {
    Aligned,
    Filler,
}

/// Output of the recommendations call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recommendations {
    aligned: Vec<Project>,
    filler: Vec<Project>,
}

impl Recommendations {
    pub fn new(aligned: Vec<Project>, filler: Vec<Project>) -> Self {
        Self { aligned, filler }
    }

    pub fn aligned(&self) -> &[Project] {
        &self.aligned
    }

    pub fn filler(&self) -> &[Project] {
        &self.filler
    }

    /// Aligned then filler, in that order; indices match [`Self::project`].
    pub fn pooled(&self) -> impl Iterator<Item = &Project> {
        self.aligned.iter().chain(self.filler.iter())
    }

    pub fn len(&self) -> usize {
        self.aligned.len() + self.filler.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn project(&self, index: usize) -> Option<&Project> {
        if index < self.aligned.len() {
            self.aligned.get(index)
        } else {
            self.filler.get(index - self.aligned.len())
        }
    }

    pub fn pool_of(&self, index: usize) -> Option<ProjectPool> {
        if index < self.aligned.len() {
            Some(ProjectPool::Aligned)
        } else if index < self.len() {
            Some(ProjectPool::Filler)
        } else {
            None
        }
    }

    /// Resolves a form's project: the pooled project at `index` must carry `title`.
    pub fn resolve(&self, index: usize, title: &str) -> Option<&Project> {
        self.project(index).filter(|p| p.title == title)
    }

    /// Titles that appear more than once across both pools.
    pub fn duplicate_titles(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for project in self.pooled() {
            if !seen.insert(project.title.as_str()) && !duplicates.contains(&project.title) {
                duplicates.push(project.title.clone());
            }
        }
        duplicates
    }

    /// Label for the collapsed filler section, if there are filler projects.
    pub fn filler_toggle_label(&self) -> Option<String> {
        if self.filler.is_empty() {
            None
        } else {
            Some(format!("Show Additional Projects ({})", self.filler.len()))
        }
    }
}
