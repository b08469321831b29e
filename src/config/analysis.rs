//! Analysis configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for batch and manual analysis runs.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Sheet holding the decision table in batch mode
    #[serde(default = "default_decision_sheet")]
    pub decision_sheet: String,

    /// Prefix of supplementary method-step sheets
    #[serde(default = "default_step_sheet_prefix")]
    pub step_sheet_prefix: String,

    /// Maximum alternatives accepted by the manual form
    #[serde(default = "default_max_entries")]
    pub max_alternatives: usize,

    /// Maximum criteria accepted by the manual form
    #[serde(default = "default_max_entries")]
    pub max_criteria: usize,
}

impl AnalysisConfig {
    /// Returns true if the sheet is a supplementary step sheet.
    pub fn is_step_sheet(&self, name: &str) -> bool {
        name.starts_with(&self.step_sheet_prefix)
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.decision_sheet.trim().is_empty() {
            return Err(ValidationError::MissingRequired("analysis.decision_sheet"));
        }
        if self.step_sheet_prefix.trim().is_empty() {
            return Err(ValidationError::MissingRequired("analysis.step_sheet_prefix"));
        }
        if self.max_alternatives == 0 || self.max_criteria == 0 {
            return Err(ValidationError::InvalidFormLimit);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            decision_sheet: default_decision_sheet(),
            step_sheet_prefix: default_step_sheet_prefix(),
            max_alternatives: default_max_entries(),
            max_criteria: default_max_entries(),
        }
    }
}

fn default_decision_sheet() -> String {
    "TABLE".to_string()
}

fn default_step_sheet_prefix() -> String {
    "STEP".to_string()
}

fn default_max_entries() -> usize {
    20
}
