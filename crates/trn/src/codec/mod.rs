//! Кодеки транзакций.
//!
//! - [`csv`] — декодирование записи CSV по [`RecordFormat`] и вывод в modcsv
//! - [`ledger`] — разбор заголовка и вывод записи журнала Ledger
//!
//! [`RecordFormat`]: crate::format::RecordFormat

pub mod csv;
pub mod ledger;

pub use self::{csv::Overrides, ledger::LedgerDialect};
use crate::transaction::Transaction;

/// Формат вывода, выбираемый во время выполнения.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Запись журнала Ledger из трёх строк.
    Ledger,
    /// Канонический CSV (modcsv).
    Csv,
}

impl OutputFormat {
    /// Имя формата.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ledger => "ledger",
            Self::Csv => "modcsv",
        }
    }

    /// Определяет формат по имени.
    ///
    /// # Examples
    ///
    /// ```
    /// use trn::codec::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_name("ledger"), Some(OutputFormat::Ledger));
    /// assert_eq!(OutputFormat::from_name("modcsv"), Some(OutputFormat::Csv));
    /// assert_eq!(OutputFormat::from_name("csv"), Some(OutputFormat::Csv));
    /// assert_eq!(OutputFormat::from_name("json"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ledger" => Some(Self::Ledger),
            "modcsv" | "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

impl Transaction {
    /// Выводит транзакцию в заданном формате.
    #[must_use]
    pub fn encode(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Ledger => self.encode_ledger(),
            OutputFormat::Csv => self.encode_csv(),
        }
    }

    /// Выводит транзакцию в формате с данным именем.
    /// Для неизвестного имени возвращает пустую строку.
    #[must_use]
    pub fn encode_as(&self, name: &str) -> String {
        OutputFormat::from_name(name).map(|format| self.encode(format)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn sample_transaction() -> Transaction {
        Transaction {
            date: "2025-05-02".to_string(),
            this_account: "Assets:Current:KB05".to_string(),
            other_account: "Assets:Current:PCUS1".to_string(),
            memo: "To term deposit".to_string(),
            amount: Decimal::new(4200, 2),
            ..Transaction::default()
        }
    }

    #[test]
    fn dispatch_by_name() {
        let tx = sample_transaction();
        assert_eq!(tx.encode_as("ledger"), tx.encode_ledger());
        assert_eq!(tx.encode_as("modcsv"), tx.encode_csv());
        assert_eq!(tx.encode_as("csv"), tx.encode_csv());
    }

    #[test]
    fn unknown_name_gives_empty_string() {
        let tx = sample_transaction();
        assert_eq!(tx.encode_as(""), "");
        assert_eq!(tx.encode_as("unknown"), "");
    }

    #[test]
    fn name_round_trip() {
        for format in [OutputFormat::Ledger, OutputFormat::Csv] {
            assert_eq!(OutputFormat::from_name(format.as_str()), Some(format));
        }
    }
}
