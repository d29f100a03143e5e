//! Per-unit results of a conversion run.

use std::path::PathBuf;

use serde::Serialize;

use crate::diagnostic::CompilerWarning;
use crate::ConversionMode;

/// Outcome of one markup file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Created,
    Merged,
    Failed(String),
}

impl From<ConversionMode> for UnitStatus {
    fn from(mode: ConversionMode) -> Self {
        match mode {
            ConversionMode::Create => Self::Created,
            ConversionMode::Merge => Self::Merged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitReport {
    pub source: PathBuf,
    /// Generated file; absent when the target could not be determined.
    pub target: Option<PathBuf>,
    pub status: UnitStatus,
    pub warnings: Vec<CompilerWarning>,
}

impl UnitReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, UnitStatus::Failed(_))
    }
}

/// Result of converting a whole directory. Failed units do not stop the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub units: Vec<UnitReport>,
}

impl BatchReport {
    pub fn created(&self) -> usize {
        self.count(|s| matches!(s, UnitStatus::Created))
    }

    pub fn merged(&self) -> usize {
        self.count(|s| matches!(s, UnitStatus::Merged))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, UnitStatus::Failed(_)))
    }

    pub fn warnings(&self) -> usize {
        self.units.iter().map(|u| u.warnings.len()).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn count(&self, pred: impl Fn(&UnitStatus) -> bool) -> usize {
        self.units.iter().filter(|u| pred(&u.status)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, status: UnitStatus) -> UnitReport {
        UnitReport {
            source: PathBuf::from(name),
            target: None,
            status,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn counts_by_status() {
        let report = BatchReport {
            units: vec![
                unit("A.fxml", UnitStatus::Created),
                unit("B.fxml", UnitStatus::Merged),
                unit("C.fxml", UnitStatus::Failed("boom".to_string())),
            ],
        };

        assert_eq!(report.created(), 1);
        assert_eq!(report.merged(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
    }

    #[test]
    fn json_report_names_the_error() {
        let report = BatchReport {
            units: vec![unit("C.fxml", UnitStatus::Failed("unknown tag".to_string()))],
        };

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["units"][0]["status"]["failed"], "unknown tag");
        assert_eq!(json["units"][0]["source"], "C.fxml");
    }
}
