//! DescribeWorkbookHandler - Sheet overview of an uploaded workbook.

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::ports::WorkbookSource;

/// Sheets found in a workbook, classified for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkbookOverview {
    pub sheets: Vec<String>,
    pub decision_sheet: String,
    pub has_decision_sheet: bool,
    /// Supplementary method-step sheets, in workbook order.
    pub step_sheets: Vec<String>,
}

/// Handler for describing a workbook.
#[derive(Debug, Clone)]
pub struct DescribeWorkbookHandler {
    config: AnalysisConfig,
}

impl DescribeWorkbookHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(&self, source: &dyn WorkbookSource) -> WorkbookOverview {
        let sheets = source.sheet_names();
        let step_sheets = sheets
            .iter()
            .filter(|name| self.config.is_step_sheet(name))
            .cloned()
            .collect();

        WorkbookOverview {
            has_decision_sheet: source.has_sheet(&self.config.decision_sheet),
            decision_sheet: self.config.decision_sheet.clone(),
            sheets,
            step_sheets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::workbook::InMemoryWorkbook;
    use crate::domain::analysis::RectangularTable;

    #[test]
    fn classifies_decision_and_step_sheets() {
        let workbook = InMemoryWorkbook::new([
            ("TABLE", RectangularTable::default()),
            ("STEP 1", RectangularTable::default()),
            ("Notes", RectangularTable::default()),
            (" STEP 2 ", RectangularTable::default()),
        ]);

        let overview = DescribeWorkbookHandler::new(AnalysisConfig::default()).handle(&workbook);

        assert_eq!(overview.sheets, vec!["TABLE", "STEP 1", "Notes", "STEP 2"]);
        assert!(overview.has_decision_sheet);
        assert_eq!(overview.step_sheets, vec!["STEP 1", "STEP 2"]);
    }

    #[test]
    fn reports_missing_decision_sheet() {
        let workbook = InMemoryWorkbook::new([("Sheet1", RectangularTable::default())]);

        let overview = DescribeWorkbookHandler::new(AnalysisConfig::default()).handle(&workbook);

        assert_eq!(overview.decision_sheet, "TABLE");
        assert!(!overview.has_decision_sheet);
        assert!(overview.step_sheets.is_empty());
    }
}
