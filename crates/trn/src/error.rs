//! Ошибки разбора форматов, дат, сумм и записей.
//!
//! Таксономия:
//!
//! - [`ConfigError`] — формат записи CSV непригоден; исправить автоматически нельзя
//! - [`DecodeError`] — одна запись не стала транзакцией; запись пропускается
//! - [`LedgerError`] — заголовок записи журнала Ledger не разобран
//! - [`RecordError`] — ошибка потокового чтения выписки
//! - [`JournalError`] — журнал Ledger не прочитан

use std::{io, path::PathBuf};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::format::Role;

/// Ошибка разбора даты по шаблону.
#[derive(Debug, Error)]
pub enum DateError {
    /// Текст не соответствует шаблону или задаёт несуществующую дату.
    #[error("cannot parse date '{text}' with layout '{layout}': {source}")]
    Mismatch {
        /// Исходный текст даты.
        text: String,
        /// Шаблон, по которому шёл разбор.
        layout: String,
        #[source]
        source: jiff::Error,
    },

    /// Дата разобрана, но текст записан не в точности по шаблону
    /// (`2025-5-7` при шаблоне `2006-01-02`).
    #[error("date '{text}' does not match layout '{layout}' exactly")]
    Inexact {
        /// Исходный текст даты.
        text: String,
        /// Шаблон, по которому шёл разбор.
        layout: String,
    },

    /// Шаблон содержит элемент времени суток.
    #[error("date layout '{layout}' contains unsupported time element '{element}'")]
    UnsupportedElement {
        /// Шаблон целиком.
        layout: String,
        /// Неподдерживаемый элемент.
        element: &'static str,
    },
}

/// Ошибка вычисления суммы из колонок amount/credit/debit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Текст не является десятичным числом.
    #[error("{role} value '{text}' is not a decimal number")]
    NumberSyntax {
        /// Колонка, из которой взят текст.
        role: Role,
        /// Текст до удаления пунктуации.
        text: String,
    },

    /// Кредит или дебет не строго положителен.
    #[error("{role} value {value} must be positive")]
    NotPositive {
        /// Колонка кредита или дебета.
        role: Role,
        /// Разобранное значение.
        value: Decimal,
    },

    /// Кредит и дебет оба пусты или оба заполнены.
    #[error("credit '{credit}' and debit '{debit}' cannot both be empty or both be set")]
    CreditDebitConflict {
        /// Текст колонки кредита.
        credit: String,
        /// Текст колонки дебета.
        debit: String,
    },
}

/// Формат записи CSV не прошёл проверку или не прочитан.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Файл формата не прочитан.
    #[error("cannot read record format from {}: {source}", path.display())]
    Io {
        /// Путь к файлу формата.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// XML формата синтаксически некорректен.
    #[error("cannot parse record format: {0}")]
    Syntax(#[from] quick_xml::de::DeError),

    /// Число полей вне допустимого диапазона.
    #[error("number of fields {n_fields} is out of range {min}..={max}")]
    FieldCountRange {
        /// Заявленное число полей.
        n_fields: u8,
        /// Нижняя граница.
        min: u8,
        /// Верхняя граница.
        max: u8,
    },

    /// Индекс колонки больше числа полей.
    #[error("{role} index {index} exceeds the number of fields {n_fields}")]
    IndexRange {
        /// Роль с некорректным индексом.
        role: Role,
        /// Индекс колонки.
        index: u8,
        /// Число полей записи.
        n_fields: u8,
    },

    /// Две роли ссылаются на одну колонку.
    #[error("{role} index {index} is already used by {other}")]
    IndexCollision {
        /// Роль, обнаружившая коллизию.
        role: Role,
        /// Роль, первой занявшая колонку.
        other: Role,
        /// Общий индекс.
        index: u8,
    },

    /// Не задан индекс даты.
    #[error("date index cannot be zero")]
    MissingDateRole,

    /// Не задан индекс описания.
    #[error("memo index cannot be zero")]
    MissingMemoRole,

    /// Нет ни суммы, ни пары кредит/дебет.
    #[error("amount index, or both credit and debit indexes, must be non-zero")]
    MissingAmountRole,

    /// Шаблон даты не воспроизводит сам себя.
    #[error("date layout '{layout}' must be written as the date 2006-01-02, e.g. \"02/01/2006\"")]
    InvalidDateLayout {
        /// Проверенный шаблон.
        layout: String,
    },
}

/// Запись CSV не преобразована в транзакцию.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Число полей записи отличается от формата.
    #[error("record has {actual} fields, expected {expected}")]
    FieldCountMismatch {
        /// Число полей по формату.
        expected: u8,
        /// Фактическое число полей.
        actual: usize,
    },

    /// Дата не разобрана.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Сумма не вычислена.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// Сумма равна нулю.
    #[error("amount cannot be zero")]
    ZeroAmount,

    /// Пустое описание.
    #[error("memo cannot be empty")]
    EmptyMemo,

    /// Счёт-владелец не задан ни колонкой, ни явно.
    #[error("this account is empty and not given explicitly")]
    MissingThisAccount,

    /// Счёт-владелец совпадает со счётом по умолчанию.
    #[error("this account cannot be '{0}'")]
    InvalidThisAccount(String),
}

/// Первая строка записи журнала не разобрана.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Строка не начинается с цифры.
    #[error("entry line must start with a digit: '{line}'")]
    NotAnEntryStart {
        /// Отвергнутая строка.
        line: String,
    },

    /// Дата заголовка не разобрана.
    #[error(transparent)]
    Date(#[from] DateError),
}

/// Ошибка потокового чтения выписки.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Поток CSV повреждён или не читается; чтение прекращается.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// Запись на строке `line` отвергнута; чтение продолжается.
    #[error("line {line}: {source}")]
    Decode {
        /// Номер строки (1-based).
        line: u64,
        #[source]
        source: DecodeError,
    },
}

impl RecordError {
    /// Можно ли пропустить запись и читать дальше.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// Ошибка чтения журнала Ledger.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Поток журнала не читается.
    #[error("cannot read journal: {0}")]
    Io(#[from] io::Error),

    /// Запись, начинающаяся на строке `line`, не разобрана.
    #[error("line {line}: {source}")]
    Entry {
        /// Номер первой строки записи (1-based).
        line: usize,
        #[source]
        source: LedgerError,
    },
}
