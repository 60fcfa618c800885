use std::collections::HashMap;

use thiserror::Error;

/// Errors raised by the review generation workflow.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("could not fetch prompt template: {0}")]
    PromptTemplate(String),
}

/// The fixed review sections, in canonical output order.
///
/// The enum order is the order sections appear in the published document,
/// regardless of which generation call finishes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    General,
    Payments,
    Games,
    ResponsibleGambling,
    Bonuses,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::General,
        Section::Payments,
        Section::Games,
        Section::ResponsibleGambling,
        Section::Bonuses,
    ];

    /// The human-readable title, also used as the heading text in the
    /// published document and as the `**Title**` marker between sections.
    pub fn title(&self) -> &'static str {
        match self {
            Section::General => "General",
            Section::Payments => "Payments",
            Section::Games => "Games",
            Section::ResponsibleGambling => "Responsible Gambling",
            Section::Bonuses => "Bonuses",
        }
    }

    pub fn from_title(title: &str) -> Option<Section> {
        Section::ALL.iter().copied().find(|s| s.title() == title)
    }

    /// Zero-based column offsets (main notes, top comparison, similar
    /// comparison) of this section's data within a `B2:R` sheet row.
    pub fn column_offsets(&self) -> (usize, usize, usize) {
        match self {
            Section::General => (2, 3, 4),
            Section::Payments => (5, 6, 7),
            Section::Games => (8, 9, 10),
            Section::ResponsibleGambling => (11, 12, 13),
            Section::Bonuses => (14, 15, 16),
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Free-text inputs for one section, distilled from the sheet rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInputs {
    pub main: String,
    pub top: String,
    pub similar: String,
}

impl SectionInputs {
    /// Collects one section's inputs from the raw sheet rows.
    ///
    /// Each column is joined across rows, skipping blank cells and rows too
    /// short to contain the column. Only the main notes get a placeholder
    /// when empty; the comparison columns are best-effort.
    pub fn from_rows(rows: &[Vec<String>], cols: (usize, usize, usize)) -> SectionInputs {
        let (main_col, top_col, sim_col) = cols;
        let main = join_column(rows, main_col);
        SectionInputs {
            main: if main.is_empty() {
                "[No data provided]".to_string()
            } else {
                main
            },
            top: join_column(rows, top_col),
            similar: join_column(rows, sim_col),
        }
    }
}

fn join_column(rows: &[Vec<String>], col: usize) -> String {
    rows.iter()
        .filter_map(|row| row.get(col))
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Everything read from the spreadsheet for one run.
#[derive(Debug, Clone)]
pub struct CasinoSheet {
    pub casino: String,
    pub inputs: HashMap<Section, SectionInputs>,
}

impl CasinoSheet {
    /// Builds the per-section inputs from the `B2:R` row block.
    pub fn from_rows(casino: String, rows: &[Vec<String>]) -> CasinoSheet {
        let inputs = Section::ALL
            .iter()
            .map(|&section| {
                (
                    section,
                    SectionInputs::from_rows(rows, section.column_offsets()),
                )
            })
            .collect();
        CasinoSheet { casino, inputs }
    }
}
