use std::fmt;

use tracing::info;

/// Labelled Pearson coefficients against observed pupil dilation
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationReport {
    heading: String,
    entries: Vec<(String, f64)>,
}

impl CorrelationReport {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, coefficient: f64) {
        let label = label.into();
        info!(signal = %label, r = coefficient, "correlation with actual pupil dilation");
        self.entries.push((label, coefficient));
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, r)| *r)
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }
}

impl fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        for (label, r) in &self.entries {
            writeln!(f, "{label}: {r:.3}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_formatting() {
        let mut report = CorrelationReport::new("Pearson Correlation with Actual Pupil Dilation:");
        report.push("LC Activation", 0.12345);
        report.push("NE Activation", -0.5);

        assert_eq!(
            report.to_string(),
            "Pearson Correlation with Actual Pupil Dilation:\nLC Activation: 0.123\nNE Activation: -0.500\n"
        );
        assert_eq!(report.get("NE Activation"), Some(-0.5));
        assert_eq!(report.get("Cortex Activation"), None);
    }
}
