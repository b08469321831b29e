//! Matrix Extractor - parses a decision table into a judgment matrix.
//!
//! # Table Layout
//!
//! After fully blank rows are dropped, the third populated row (index 2)
//! names the criteria and every row after it is a candidate alternative.
//! Column 0 holds the alternative name.
//!
//! ```text
//! row 0   | title ...                                   |
//! row 1   | notes ...                                   |
//! row 2   | (corner) | Crit A |     |     | Crit B |    |    |
//! row 3.. | Alt 1    | ρ      | ρ̄   | σ   | ρ      | ρ̄  | σ  |
//! ```
//!
//! Two encodings are supported:
//! - `TripleNumeric`: three consecutive columns per criterion, starting at
//!   column 1, named by the header of the group's first column.
//! - `Labeled`: one column per criterion holding a lexicon label, optionally
//!   followed by comma-separated annotation text which is discarded.
//!
//! # Recovery Rules
//!
//! Rows whose first cell is blank, `none`, or starts with `step` are section
//! markers and are skipped entirely. A single bad cell (or triple) is skipped
//! for that criterion only; the alternative's other criteria are kept. Only a
//! table without the header offset or without any criterion column is fatal.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AnalysisError, Cell, JudgmentMatrix, JudgmentMatrixBuilder, RectangularTable};
use crate::domain::fuzzy::{Lexicon, PictureFuzzyValue};

/// Populated-row index of the criterion header row, counted after any
/// spreadsheet column-header row has been removed.
pub const HEADER_ROW: usize = 2;

/// First column holding judgments; column 0 is the alternative name.
pub const FIRST_JUDGMENT_COLUMN: usize = 1;

/// Columns per criterion in the triple-numeric encoding.
pub const TRIPLE_WIDTH: usize = 3;

/// How judgments are encoded in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableEncoding {
    /// `(ρ, ρ̄, σ)` spread over three numeric columns per criterion.
    #[default]
    TripleNumeric,
    /// One lexicon label per criterion column.
    Labeled,
}

/// Why a single (alternative, criterion) cell was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// At least one cell of the group was blank.
    Blank,
    /// At least one cell did not parse as a number.
    Unparsable,
    /// A cell parsed to NaN.
    NotANumber,
    /// A numeric cell appeared where a label was expected.
    NotALabel,
}

/// A populated row that was not treated as an alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row: usize,
    pub marker: String,
}

/// A single (alternative, criterion) judgment that was left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCell {
    pub row: usize,
    pub alternative: String,
    pub criterion: String,
    pub reason: SkipReason,
}

/// A label that was not in the lexicon and fell back to the neutral default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownLabel {
    pub alternative: String,
    pub criterion: String,
    pub label: String,
}

/// Everything the extractor recovered from locally instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub skipped_rows: Vec<SkippedRow>,
    pub skipped_cells: Vec<SkippedCell>,
    pub unknown_labels: Vec<UnknownLabel>,
    /// Judgment columns ignored because their header was blank.
    pub unnamed_columns: Vec<usize>,
    /// Alternatives whose earlier row was replaced by a later duplicate.
    pub replaced_alternatives: Vec<String>,
}

impl ExtractionReport {
    /// Returns true if nothing had to be skipped or defaulted.
    pub fn is_clean(&self) -> bool {
        self.skipped_cells.is_empty()
            && self.unknown_labels.is_empty()
            && self.unnamed_columns.is_empty()
            && self.replaced_alternatives.is_empty()
    }
}

/// Result of extracting one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub matrix: JudgmentMatrix,
    pub report: ExtractionReport,
}

/// A criterion column (or column group) located in the header row.
struct CriterionColumn {
    name: String,
    start: usize,
}

/// Table-to-matrix extraction functions.
pub struct MatrixExtractor;

impl MatrixExtractor {
    /// Extracts a triple-numeric table, discarding the report.
    pub fn extract_matrix(table: &RectangularTable) -> Result<JudgmentMatrix, AnalysisError> {
        Self::extract(table, TableEncoding::TripleNumeric).map(|e| e.matrix)
    }

    /// Extracts a judgment matrix from a table in the given encoding.
    ///
    /// # Errors
    /// - `MalformedTable` if the header row is missing or names no criterion
    ///   column. Bad individual cells never fail the extraction.
    pub fn extract(
        table: &RectangularTable,
        encoding: TableEncoding,
    ) -> Result<Extraction, AnalysisError> {
        let mut report = ExtractionReport::default();
        let columns = Self::criterion_columns(table, encoding, &mut report)?;
        let mut builder = JudgmentMatrix::builder();

        for row in (HEADER_ROW + 1)..table.row_count() {
            let alternative = table.cell(row, 0).text();
            if Self::is_section_marker(&alternative) {
                debug!(row, marker = %alternative, "Skipping non-alternative row");
                report.skipped_rows.push(SkippedRow {
                    row,
                    marker: alternative,
                });
                continue;
            }

            if builder.begin_alternative(alternative.clone()) {
                warn!(row, alternative = %alternative, "Duplicate alternative row replaces earlier row");
                report.replaced_alternatives.push(alternative.clone());
            }

            for column in &columns {
                let value = match encoding {
                    TableEncoding::TripleNumeric => Self::read_triple(table, row, column.start),
                    TableEncoding::Labeled => Self::read_label(
                        table.cell(row, column.start),
                        &alternative,
                        &column.name,
                        &mut report,
                    ),
                };

                match value {
                    Ok(value) => builder.insert(alternative.clone(), column.name.clone(), value),
                    Err(reason) => {
                        debug!(
                            row,
                            alternative = %alternative,
                            criterion = %column.name,
                            ?reason,
                            "Skipping judgment cell"
                        );
                        report.skipped_cells.push(SkippedCell {
                            row,
                            alternative: alternative.clone(),
                            criterion: column.name.clone(),
                            reason,
                        });
                    }
                }
            }
        }

        Self::finish(builder, report)
    }

    fn finish(
        builder: JudgmentMatrixBuilder,
        report: ExtractionReport,
    ) -> Result<Extraction, AnalysisError> {
        let matrix = builder.build();
        debug!(
            alternatives = matrix.alternative_count(),
            judgments = matrix.judgment_count(),
            skipped_rows = report.skipped_rows.len(),
            skipped_cells = report.skipped_cells.len(),
            "Extracted judgment matrix"
        );
        Ok(Extraction { matrix, report })
    }

    /// Locates the criterion columns named by the header row.
    fn criterion_columns(
        table: &RectangularTable,
        encoding: TableEncoding,
        report: &mut ExtractionReport,
    ) -> Result<Vec<CriterionColumn>, AnalysisError> {
        if table.row_count() <= HEADER_ROW {
            return Err(AnalysisError::malformed_table(format!(
                "expected criterion headers on populated row {}, table has {} populated rows",
                HEADER_ROW + 1,
                table.row_count()
            )));
        }

        let width = table.column_count();
        let starts: Vec<usize> = match encoding {
            // Only complete groups of three are read; a partial trailing group is ignored.
            TableEncoding::TripleNumeric => (FIRST_JUDGMENT_COLUMN
                ..width.saturating_sub(TRIPLE_WIDTH - 1))
                .step_by(TRIPLE_WIDTH)
                .collect(),
            TableEncoding::Labeled => (FIRST_JUDGMENT_COLUMN..width).collect(),
        };

        if starts.is_empty() {
            return Err(AnalysisError::malformed_table(format!(
                "table has {} columns, too few for any criterion column",
                width
            )));
        }

        let mut columns = Vec::with_capacity(starts.len());
        for start in starts {
            let name = table.cell(HEADER_ROW, start).text();
            if name.is_empty() {
                warn!(column = start, "Ignoring judgment column with blank criterion header");
                report.unnamed_columns.push(start);
                continue;
            }
            columns.push(CriterionColumn { name, start });
        }

        if columns.is_empty() {
            return Err(AnalysisError::malformed_table(
                "header row names no criteria",
            ));
        }
        Ok(columns)
    }

    /// Returns true for blank, `none`, and `step...` first-column values.
    fn is_section_marker(first_cell: &str) -> bool {
        let lowered = first_cell.trim().to_lowercase();
        lowered.is_empty() || lowered == "none" || lowered.starts_with("step")
    }

    fn read_triple(
        table: &RectangularTable,
        row: usize,
        start: usize,
    ) -> Result<PictureFuzzyValue, SkipReason> {
        let mut parts = [0.0_f64; TRIPLE_WIDTH];
        for (offset, part) in parts.iter_mut().enumerate() {
            let cell = table.cell(row, start + offset);
            if cell.is_blank() {
                return Err(SkipReason::Blank);
            }
            *part = cell.parse_f64().ok_or(SkipReason::Unparsable)?;
        }

        let value = PictureFuzzyValue::new(parts[0], parts[1], parts[2]);
        if value.has_nan() {
            return Err(SkipReason::NotANumber);
        }
        Ok(value)
    }

    fn read_label(
        cell: &Cell,
        alternative: &str,
        criterion: &str,
        report: &mut ExtractionReport,
    ) -> Result<PictureFuzzyValue, SkipReason> {
        let text = match cell {
            Cell::Empty => return Err(SkipReason::Blank),
            Cell::Number(_) => return Err(SkipReason::NotALabel),
            Cell::Text(text) => text,
        };

        // "Very Important, per site survey" -> "Very Important"
        let label = text.split(',').next().unwrap_or_default().trim();
        if label.is_empty() {
            return Err(SkipReason::Blank);
        }

        match Lexicon::get(label) {
            Some(value) => Ok(value),
            None => {
                debug!(alternative, criterion, label, "Unknown label, using neutral default");
                report.unknown_labels.push(UnknownLabel {
                    alternative: alternative.to_string(),
                    criterion: criterion.to_string(),
                    label: label.to_string(),
                });
                Ok(Lexicon::resolve(label))
            }
        }
    }
}
