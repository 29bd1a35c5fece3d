//! Tour step catalog.
//!
//! The catalog is an ordered, immutable list of [`TourStep`]s. Order defines
//! the step sequence. The coordinator dashboard ships an embedded catalog;
//! product authors can replace it with a JSON or YAML file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use learnova_types::{AnchorSide, MascotMood, TourStep};
use once_cell::sync::Lazy;
use thiserror::Error;

/// Errors produced while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("tour catalog has no steps")]
    Empty,
    #[error("duplicate tour step id '{0}'")]
    DuplicateId(String),
    #[error("failed to read tour catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON tour catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML tour catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported tour catalog extension '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

/// Ordered, immutable sequence of tour steps.
#[derive(Debug, Clone, PartialEq)]
pub struct TourCatalog {
    steps: Arc<[TourStep]>,
}

impl TourCatalog {
    /// Build a catalog, rejecting empty lists and duplicate identifiers.
    pub fn new(steps: Vec<TourStep>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(steps.len());
        for step in &steps {
            if !seen.insert(step.id.as_str()) {
                return Err(CatalogError::DuplicateId(step.id.clone()));
            }
        }
        Ok(Self { steps: steps.into() })
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        Self::new(serde_yaml::from_str(content)?)
    }

    /// Load a catalog file, choosing the format from its extension.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content = fs::read_to_string(path)?;
        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }

    /// The embedded coordinator dashboard catalog.
    pub fn coordinator() -> Self {
        COORDINATOR_CATALOG.clone()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false` for a validated catalog; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Step at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range; callers index with positions the
    /// navigator has already validated.
    pub fn step(&self, index: usize) -> &TourStep {
        &self.steps[index]
    }

    pub fn get(&self, index: usize) -> Option<&TourStep> {
        self.steps.get(index)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }
}

static COORDINATOR_CATALOG: Lazy<TourCatalog> =
    Lazy::new(|| TourCatalog::new(coordinator_steps()).expect("embedded tour catalog is valid"));

fn coordinator_steps() -> Vec<TourStep> {
    vec![
        TourStep::new(
            "welcome",
            "body",
            "Welcome to Training Coordinator Dashboard! 🎓",
            "Hi! I'm Koey, your training assistant! I'll show you how to manage learners, track progress, and ensure everyone succeeds in their certification journey. Let's get started!",
            AnchorSide::Center,
        )
        .with_mood(MascotMood::Wave)
        .with_category("intro"),
        TourStep::new(
            "quick-actions",
            r#"[data-tour="quick-actions"]"#,
            "Quick Actions Panel",
            "These are your most-used actions! Send bulk messages, schedule sessions, view reports, or export data. Everything you need is just one click away.",
            AnchorSide::Bottom,
        )
        .with_padding(1.0)
        .with_mood(MascotMood::Point)
        .with_category("actions"),
        TourStep::new(
            "stats-overview",
            r#"[data-tour="stats-overview"]"#,
            "Dashboard Statistics",
            "Here's your training overview at a glance! Track total learners, active courses, completion rates, voucher redemptions, and more. Green arrows show positive trends!",
            AnchorSide::Bottom,
        )
        .with_mood(MascotMood::Happy)
        .with_category("analytics"),
        TourStep::new(
            "alerts-panel",
            r#"[data-tour="alerts-panel"]"#,
            "Alerts & Notifications",
            "Critical alerts appear here! Never miss important updates about learners falling behind, upcoming deadlines, or support tickets that need attention.",
            AnchorSide::Right,
        )
        .with_padding(1.0)
        .with_mood(MascotMood::Think)
        .with_category("monitoring"),
        TourStep::new(
            "at-risk-learners",
            r#"[data-tour="at-risk-learners"]"#,
            "At-Risk Learners",
            "This panel highlights learners who may need extra support. Click on any learner to see their full profile and send personalized encouragement!",
            AnchorSide::Right,
        )
        .with_padding(1.0)
        .with_mood(MascotMood::Think)
        .with_category("monitoring"),
        TourStep::new(
            "deadlines-widget",
            r#"[data-tour="deadlines-widget"]"#,
            "Upcoming Deadlines",
            "Keep track of certification deadlines, exam dates, and important milestones. Red badges indicate urgent items that need immediate attention!",
            AnchorSide::Left,
        )
        .with_padding(1.0)
        .with_mood(MascotMood::Point)
        .with_category("scheduling"),
        TourStep::new(
            "schedule-widget",
            r#"[data-tour="schedule-widget"]"#,
            "Today's Schedule",
            "View your daily training sessions, webinars, and meetings. Stay organized and never miss a session with your learners!",
            AnchorSide::Right,
        )
        .with_padding(1.0)
        .with_mood(MascotMood::Happy)
        .with_category("scheduling"),
        TourStep::new(
            "batch-overview",
            r#"[data-tour="batch-overview"]"#,
            "Batch Overview",
            "Monitor progress across different training batches. See completion rates, engagement levels, and identify which batches need more attention.",
            AnchorSide::Left,
        )
        .with_padding(1.0)
        .with_mood(MascotMood::Point)
        .with_category("analytics"),
        TourStep::new(
            "ai-insights",
            r#"[data-tour="ai-insights"]"#,
            "AI-Powered Insights",
            "Our AI analyzes learner behavior and provides actionable recommendations. Get suggestions on who to contact, which modules need review, and optimization tips!",
            AnchorSide::Bottom,
        )
        .with_padding(1.0)
        .with_mood(MascotMood::Celebrate)
        .with_category("analytics"),
        TourStep::new(
            "learner-list",
            r#"[data-tour="learner-list"]"#,
            "Learner Management",
            "View and manage all your learners here. Click on any learner card to see detailed progress, send messages, or schedule 1-on-1 sessions.",
            AnchorSide::Top,
        )
        .with_padding(1.0)
        .with_mood(MascotMood::Point)
        .with_category("management"),
        TourStep::new(
            "support-section",
            r#"[data-tour="support-section"]"#,
            "Support & Resources",
            "Need help? Access our customer success manager, support desk, and training resources. Your dedicated support team is always ready to assist!",
            AnchorSide::Top,
        )
        .with_padding(1.0)
        .with_mood(MascotMood::Happy)
        .with_category("support"),
        TourStep::new(
            "tour-complete",
            "body",
            "You're Ready to Go! 🎉",
            "Excellent! You now know your way around the Training Coordinator Dashboard. Start by checking your alerts and at-risk learners. Together, we'll help every learner succeed!",
            AnchorSide::Center,
        )
        .with_mood(MascotMood::Celebrate)
        .with_category("outro"),
    ]
}
