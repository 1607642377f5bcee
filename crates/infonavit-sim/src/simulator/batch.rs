use super::domain::SimulationInputs;
use super::fields::{FieldError, FieldUpdate, SimulationField};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Loads worker scenarios from a CSV export so many simulations can run at once.
pub struct BatchScenarioImporter;

impl BatchScenarioImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SimulationInputs>, BatchImportError> {
        let file = File::open(path.as_ref()).map_err(BatchImportError::Io)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SimulationInputs>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut scenarios = Vec::new();

        for (index, record) in csv_reader.deserialize::<ScenarioRow>().enumerate() {
            let row = record.map_err(BatchImportError::Csv)?;
            let inputs = row
                .into_inputs()
                .map_err(|source| BatchImportError::Field {
                    row: index + 1,
                    source,
                })?;
            scenarios.push(inputs);
        }

        if scenarios.is_empty() {
            return Err(BatchImportError::Empty);
        }

        Ok(scenarios)
    }
}

#[derive(Debug, Deserialize)]
struct ScenarioRow {
    #[serde(default)]
    full_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    monthly_salary: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    years_of_service: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    credit_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    marital_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    annual_savings_yield_percent: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    desired_term_years: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    annual_interest_percent: Option<String>,
}

impl ScenarioRow {
    fn into_inputs(self) -> Result<SimulationInputs, FieldError> {
        let mut inputs = SimulationInputs {
            full_name: self.full_name,
            ..SimulationInputs::default()
        };

        let columns = [
            (SimulationField::Age, self.age),
            (SimulationField::MonthlySalary, self.monthly_salary),
            (SimulationField::YearsOfService, self.years_of_service),
            (SimulationField::CreditType, self.credit_type),
            (SimulationField::MaritalStatus, self.marital_status),
            (
                SimulationField::AnnualSavingsYieldPercent,
                self.annual_savings_yield_percent,
            ),
            (SimulationField::DesiredTermYears, self.desired_term_years),
            (
                SimulationField::AnnualInterestPercent,
                self.annual_interest_percent,
            ),
        ];

        for (field, raw) in columns {
            if let Some(raw) = raw {
                FieldUpdate::parse(field, &raw)?.apply(&mut inputs);
            }
        }

        Ok(inputs)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Field { row: usize, source: FieldError },
    Empty,
}

impl fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read scenario file: {err}"),
            BatchImportError::Csv(err) => write!(f, "failed to parse scenario CSV: {err}"),
            BatchImportError::Field { row, source } => {
                write!(f, "scenario row {row} rejected: {source}")
            }
            BatchImportError::Empty => write!(f, "scenario CSV contained no rows"),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
            BatchImportError::Field { source, .. } => Some(source),
            BatchImportError::Empty => None,
        }
    }
}
