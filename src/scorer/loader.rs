use crate::error::{PfError, PfResult};
use std::fs::File;
use std::io::Read;
use tracing::{debug, info};

/// Labelled corpus: one text and one label per example.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    pub texts: Vec<String>,
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn new(texts: Vec<String>, labels: Vec<String>) -> PfResult<Self> {
        if texts.len() != labels.len() {
            return Err(PfError::Validation(format!(
                "{} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }
        Ok(Self { texts, labels })
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Loads a CSV with a header row naming a `text` and a `label` column.
pub fn load_dataset(path: &str) -> PfResult<Dataset> {
    info!("📂 Loading training set: {}", path);
    let file = File::open(path)?;
    let dataset = read_dataset(file)?;
    info!("   -> {} examples", dataset.len());
    Ok(dataset)
}

pub fn read_dataset<R: Read>(reader: R) -> PfResult<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| PfError::Validation(format!("Missing '{}' column", name)))
    };
    let text_col = column("text")?;
    let label_col = column("label")?;

    let mut texts = Vec::new();
    let mut labels = Vec::new();
    let mut skipped = 0;

    for result in rdr.records() {
        let rec = result?;
        match (rec.get(text_col), rec.get(label_col)) {
            (Some(text), Some(label)) if !label.trim().is_empty() => {
                texts.push(text.to_string());
                labels.push(label.trim().to_string());
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} rows without a text or label", skipped);
    }

    Dataset::new(texts, labels)
}
