use serde::{Deserialize, Serialize};

/// Renderer-agnostic description of the results document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub title: String,
    pub metadata_grid: Vec<Vec<MetadataField>>,
    pub table: ResultsTable,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataField {
    pub label: String,
    pub value: String,
}

impl MetadataField {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        MetadataField {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultsTable {
    pub header: Vec<Cell>,
    pub sub_header: Vec<Cell>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultsTable {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub align: Alignment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

impl Cell {
    pub fn left(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            align: Alignment::Left,
            tone: None,
        }
    }

    pub fn centered(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            align: Alignment::Center,
            tone: None,
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
}

/// Semantic color hint; the renderer picks the actual color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Positive,
    Negative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "Pass",
            Verdict::Fail => "Fail",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Verdict::Pass => Tone::Positive,
            Verdict::Fail => Tone::Negative,
        }
    }
}

/// A student's scores together with the derived aggregate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentResult {
    pub name: String,
    pub scores: Vec<f64>,
    pub percent: f64,
    pub verdict: Verdict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_maps_to_semantic_tone() {
        assert_eq!(Verdict::Pass.tone(), Tone::Positive);
        assert_eq!(Verdict::Fail.tone(), Tone::Negative);
        assert_eq!(Verdict::Fail.label(), "Fail");
    }

    #[test]
    fn plain_cells_carry_no_tone() {
        let cell = Cell::centered("80.0");
        assert_eq!(cell.align, Alignment::Center);
        assert!(cell.tone.is_none());

        let json = serde_json::to_value(&cell).expect("cell should serialize");
        assert!(json.get("tone").is_none());
    }
}
