use serde::{Deserialize, Serialize};
use std::fmt;

/// INFONAVIT credit product requested by the worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditType {
    #[default]
    Traditional,
    Cofinavit,
    Mejoravit,
}

impl CreditType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Traditional, Self::Cofinavit, Self::Mejoravit]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Traditional => "Crédito Tradicional",
            Self::Cofinavit => "Cofinavit",
            Self::Mejoravit => "Mejoravit",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "traditional" | "tradicional" => Some(Self::Traditional),
            "cofinavit" => Some(Self::Cofinavit),
            "mejoravit" => Some(Self::Mejoravit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
}

impl MaritalStatus {
    pub const fn ordered() -> [Self; 2] {
        [Self::Single, Self::Married]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Soltero(a)",
            Self::Married => "Casado(a)",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "single" | "soltero" | "soltera" => Some(Self::Single),
            "married" | "casado" | "casada" => Some(Self::Married),
            _ => None,
        }
    }
}

/// Loan horizon offered by the simulator. Only these five terms exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LoanTerm {
    Five,
    Ten,
    Fifteen,
    #[default]
    Twenty,
    Thirty,
}

impl LoanTerm {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Five,
            Self::Ten,
            Self::Fifteen,
            Self::Twenty,
            Self::Thirty,
        ]
    }

    pub const fn years(self) -> u32 {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Fifteen => 15,
            Self::Twenty => 20,
            Self::Thirty => 30,
        }
    }

    pub const fn from_years(years: u32) -> Option<Self> {
        match years {
            5 => Some(Self::Five),
            10 => Some(Self::Ten),
            15 => Some(Self::Fifteen),
            20 => Some(Self::Twenty),
            30 => Some(Self::Thirty),
            _ => None,
        }
    }
}

impl fmt::Display for LoanTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} years", self.years())
    }
}

impl Serialize for LoanTerm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.years())
    }
}

impl<'de> Deserialize<'de> for LoanTerm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let years = u32::deserialize(deserializer)?;
        LoanTerm::from_years(years).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "desired term must be one of 5, 10, 15, 20 or 30 years (found {years})"
            ))
        })
    }
}

/// Raw snapshot of everything the worker has typed into the simulator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationInputs {
    pub full_name: String,
    pub age: u32,
    pub monthly_salary: f64,
    pub years_of_service: f64,
    pub credit_type: CreditType,
    pub marital_status: MaritalStatus,
    pub annual_savings_yield_percent: f64,
    pub desired_term_years: LoanTerm,
    pub annual_interest_percent: f64,
    pub contact_email: String,
    pub contact_phone: String,
    pub consent_given: bool,
}

/// Derived figures. Always rebuilt from a full [`SimulationInputs`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResults {
    pub base_savings: f64,
    pub compounded_savings: f64,
    pub credit_factor: u8,
    pub estimated_credit: f64,
    pub total_available_amount: f64,
    pub estimated_monthly_payment: f64,
}

/// Wizard steps in presentation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    WorkerData,
    SavingsEstimate,
    CreditCalculation,
    PaymentEstimate,
    ResultsSummary,
    Contact,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::WorkerData,
            Self::SavingsEstimate,
            Self::CreditCalculation,
            Self::PaymentEstimate,
            Self::ResultsSummary,
            Self::Contact,
        ]
    }

    /// 1-based position within the wizard.
    pub const fn index(self) -> u8 {
        match self {
            Self::WorkerData => 1,
            Self::SavingsEstimate => 2,
            Self::CreditCalculation => 3,
            Self::PaymentEstimate => 4,
            Self::ResultsSummary => 5,
            Self::Contact => 6,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::WorkerData => "Datos del trabajador",
            Self::SavingsEstimate => "Ahorro estimado",
            Self::CreditCalculation => "Cálculo de crédito",
            Self::PaymentEstimate => "Pago mensual",
            Self::ResultsSummary => "Resumen",
            Self::Contact => "Contacto",
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::WorkerData => Some(Self::SavingsEstimate),
            Self::SavingsEstimate => Some(Self::CreditCalculation),
            Self::CreditCalculation => Some(Self::PaymentEstimate),
            Self::PaymentEstimate => Some(Self::ResultsSummary),
            Self::ResultsSummary => Some(Self::Contact),
            Self::Contact => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::WorkerData => None,
            Self::SavingsEstimate => Some(Self::WorkerData),
            Self::CreditCalculation => Some(Self::SavingsEstimate),
            Self::PaymentEstimate => Some(Self::CreditCalculation),
            Self::ResultsSummary => Some(Self::PaymentEstimate),
            Self::Contact => Some(Self::ResultsSummary),
        }
    }
}

/// Listing category used when handing results to property search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    #[default]
    House,
    Apartment,
    Land,
    Commercial,
}

impl PropertyType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Land => "land",
            Self::Commercial => "commercial",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "house" | "casa" => Some(Self::House),
            "apartment" | "departamento" => Some(Self::Apartment),
            "land" | "terreno" => Some(Self::Land),
            "commercial" | "local" => Some(Self::Commercial),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
