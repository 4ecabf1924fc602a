//! Модель транзакции.
//!
//! Этот модуль определяет каноническую структуру [`Transaction`], общую для
//! всех форматов (CSV банка, modcsv, Ledger), и её проверку.

mod types;
mod validation;

pub use types::{DEFAULT_OTHER_ACCOUNT, Transaction};
pub use validation::ValidationError;
