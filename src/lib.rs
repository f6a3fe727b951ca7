pub mod calculator;
pub mod config;
pub mod error;
pub mod export;
pub mod fields;
pub mod history;
pub mod info;
pub mod session;
pub mod validation;

pub use calculator::{compute, CalculationResult};
pub use config::Settings;
pub use error::{Error, Result};
pub use fields::{AgeBracket, Field, FormFields};
pub use history::History;
pub use session::SavingsCalculator;
pub use validation::{validate, ValidationErrors};
