//! Behavioural observations aligned with model inputs

use std::collections::BTreeMap;

use crate::error::{AnalysisError, Result};

/// Observed pupil dilation per trial
pub const PUPIL_COLUMN: &str = "Event_PupilDilation";
/// Experimental condition label per trial
pub const CONDITION_COLUMN: &str = "Condition";

/// Read-only table of numeric and categorical columns of equal length.
///
/// Row `i` describes the same trial as row `i` of the model input batch.
#[derive(Debug, Clone, Default)]
pub struct ObservationFrame {
    len: usize,
    numeric: BTreeMap<String, Vec<f64>>,
    categorical: BTreeMap<String, Vec<String>>,
}

impl ObservationFrame {
    /// Frame with the two columns the analysis procedures need
    pub fn new(pupil: Vec<f64>, condition: Vec<String>) -> Result<Self> {
        Self::default()
            .with_numeric(PUPIL_COLUMN, pupil)?
            .with_categorical(CONDITION_COLUMN, condition)
    }

    pub fn with_numeric(mut self, name: &str, values: Vec<f64>) -> Result<Self> {
        self.check_len(name, values.len())?;
        self.numeric.insert(name.to_string(), values);
        Ok(self)
    }

    pub fn with_categorical(mut self, name: &str, values: Vec<String>) -> Result<Self> {
        self.check_len(name, values.len())?;
        self.categorical.insert(name.to_string(), values);
        Ok(self)
    }

    fn check_len(&mut self, name: &str, len: usize) -> Result<()> {
        if self.numeric.is_empty() && self.categorical.is_empty() {
            self.len = len;
            return Ok(());
        }
        if len != self.len {
            return Err(AnalysisError::ColumnLength {
                name: name.to_string(),
                len,
                expected: self.len,
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        self.numeric
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
    }

    pub fn categorical(&self, name: &str) -> Result<&[String]> {
        self.categorical
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
    }

    pub fn pupil(&self) -> Result<&[f64]> {
        self.numeric(PUPIL_COLUMN)
    }

    pub fn condition(&self) -> Result<&[String]> {
        self.categorical(CONDITION_COLUMN)
    }

    /// First `len` rows (or all rows if the frame is shorter)
    pub fn head(&self, len: usize) -> Self {
        let len = len.min(self.len);
        Self {
            len,
            numeric: self
                .numeric
                .iter()
                .map(|(k, v)| (k.clone(), v[..len].to_vec()))
                .collect(),
            categorical: self
                .categorical
                .iter()
                .map(|(k, v)| (k.clone(), v[..len].to_vec()))
                .collect(),
        }
    }
}
