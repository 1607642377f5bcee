use super::domain::{CreditType, LoanTerm, MaritalStatus, SimulationInputs};
use super::sanitize::{coerce_age, coerce_non_negative, parse_flag, parse_savings_yield, parse_term};
use serde::{Deserialize, Serialize};

/// Names of the editable simulator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimulationField {
    FullName,
    Age,
    MonthlySalary,
    YearsOfService,
    CreditType,
    MaritalStatus,
    AnnualSavingsYieldPercent,
    DesiredTermYears,
    AnnualInterestPercent,
    ContactEmail,
    ContactPhone,
    ConsentGiven,
}

impl SimulationField {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::FullName,
            Self::Age,
            Self::MonthlySalary,
            Self::YearsOfService,
            Self::CreditType,
            Self::MaritalStatus,
            Self::AnnualSavingsYieldPercent,
            Self::DesiredTermYears,
            Self::AnnualInterestPercent,
            Self::ContactEmail,
            Self::ContactPhone,
            Self::ConsentGiven,
        ]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Age => "age",
            Self::MonthlySalary => "monthlySalary",
            Self::YearsOfService => "yearsOfService",
            Self::CreditType => "creditType",
            Self::MaritalStatus => "maritalStatus",
            Self::AnnualSavingsYieldPercent => "annualSavingsYieldPercent",
            Self::DesiredTermYears => "desiredTermYears",
            Self::AnnualInterestPercent => "annualInterestPercent",
            Self::ContactEmail => "contactEmail",
            Self::ContactPhone => "contactPhone",
            Self::ConsentGiven => "consentGiven",
        }
    }

    /// Accepts both the camelCase wire name and its snake_case spelling.
    pub fn from_name(raw: &str) -> Option<Self> {
        let wanted: String = raw
            .trim()
            .chars()
            .filter(|ch| *ch != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|field| field.name().to_ascii_lowercase() == wanted)
    }
}

/// One typed mutation of [`SimulationInputs`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    FullName(String),
    Age(u32),
    MonthlySalary(f64),
    YearsOfService(f64),
    CreditType(CreditType),
    MaritalStatus(MaritalStatus),
    AnnualSavingsYieldPercent(f64),
    DesiredTermYears(LoanTerm),
    AnnualInterestPercent(f64),
    ContactEmail(String),
    ContactPhone(String),
    ConsentGiven(bool),
}

impl FieldUpdate {
    /// Parse raw text typed for `field`, coercing malformed numbers to zero.
    pub fn parse(field: SimulationField, raw: &str) -> Result<Self, FieldError> {
        let update = match field {
            SimulationField::FullName => Self::FullName(raw.trim().to_string()),
            SimulationField::Age => Self::Age(coerce_age(raw)),
            SimulationField::MonthlySalary => Self::MonthlySalary(coerce_non_negative(raw)),
            SimulationField::YearsOfService => Self::YearsOfService(coerce_non_negative(raw)),
            SimulationField::CreditType => {
                Self::CreditType(CreditType::parse(raw).ok_or_else(|| invalid_choice(field, raw))?)
            }
            SimulationField::MaritalStatus => Self::MaritalStatus(
                MaritalStatus::parse(raw).ok_or_else(|| invalid_choice(field, raw))?,
            ),
            SimulationField::AnnualSavingsYieldPercent => {
                Self::AnnualSavingsYieldPercent(parse_savings_yield(raw)?)
            }
            SimulationField::DesiredTermYears => Self::DesiredTermYears(parse_term(raw)?),
            SimulationField::AnnualInterestPercent => {
                Self::AnnualInterestPercent(coerce_non_negative(raw))
            }
            SimulationField::ContactEmail => Self::ContactEmail(raw.trim().to_string()),
            SimulationField::ContactPhone => Self::ContactPhone(raw.trim().to_string()),
            SimulationField::ConsentGiven => Self::ConsentGiven(parse_flag(raw)),
        };
        Ok(update)
    }

    /// Parse a field addressed by its wire name.
    pub fn parse_named(name: &str, raw: &str) -> Result<Self, FieldError> {
        let field = SimulationField::from_name(name).ok_or_else(|| FieldError::UnknownField {
            name: name.to_string(),
        })?;
        Self::parse(field, raw)
    }

    pub fn field(&self) -> SimulationField {
        match self {
            Self::FullName(_) => SimulationField::FullName,
            Self::Age(_) => SimulationField::Age,
            Self::MonthlySalary(_) => SimulationField::MonthlySalary,
            Self::YearsOfService(_) => SimulationField::YearsOfService,
            Self::CreditType(_) => SimulationField::CreditType,
            Self::MaritalStatus(_) => SimulationField::MaritalStatus,
            Self::AnnualSavingsYieldPercent(_) => SimulationField::AnnualSavingsYieldPercent,
            Self::DesiredTermYears(_) => SimulationField::DesiredTermYears,
            Self::AnnualInterestPercent(_) => SimulationField::AnnualInterestPercent,
            Self::ContactEmail(_) => SimulationField::ContactEmail,
            Self::ContactPhone(_) => SimulationField::ContactPhone,
            Self::ConsentGiven(_) => SimulationField::ConsentGiven,
        }
    }

    pub(crate) fn apply(self, inputs: &mut SimulationInputs) {
        match self {
            Self::FullName(value) => inputs.full_name = value,
            Self::Age(value) => inputs.age = value,
            Self::MonthlySalary(value) => inputs.monthly_salary = value,
            Self::YearsOfService(value) => inputs.years_of_service = value,
            Self::CreditType(value) => inputs.credit_type = value,
            Self::MaritalStatus(value) => inputs.marital_status = value,
            Self::AnnualSavingsYieldPercent(value) => inputs.annual_savings_yield_percent = value,
            Self::DesiredTermYears(value) => inputs.desired_term_years = value,
            Self::AnnualInterestPercent(value) => inputs.annual_interest_percent = value,
            Self::ContactEmail(value) => inputs.contact_email = value,
            Self::ContactPhone(value) => inputs.contact_phone = value,
            Self::ConsentGiven(value) => inputs.consent_given = value,
        }
    }
}

fn invalid_choice(field: SimulationField, raw: &str) -> FieldError {
    FieldError::InvalidChoice {
        field: field.name(),
        raw: raw.trim().to_string(),
    }
}

/// Rejections raised while parsing a field at the input boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown simulator field '{name}'")]
    UnknownField { name: String },
    #[error("'{raw}' is not a valid option for {field}")]
    InvalidChoice { field: &'static str, raw: String },
    #[error("desired term must be 5, 10, 15, 20 or 30 years (found '{raw}')")]
    InvalidTerm { raw: String },
    #[error("savings yield cannot be below -100% (found {found})")]
    YieldBelowFloor { found: f64 },
}
