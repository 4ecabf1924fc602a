//! Каноническая транзакция.

use rust_decimal::Decimal;

/// Счёт-корреспондент по умолчанию, когда запись его не содержит.
pub const DEFAULT_OTHER_ACCOUNT: &str = "Imbalance";

/// Финансовая транзакция: перевод суммы между двумя счетами в определённый день.
///
/// Транзакция принадлежит счёту-владельцу (`this_account`) — тому, чья
/// выписка импортируется. Поля заполняются декодером CSV, разбором заголовка
/// Ledger или напрямую; проверка выполняется по запросу через
/// [`validate`](Self::validate).
///
/// # Пример
///
/// ```
/// use rust_decimal::Decimal;
/// use trn::transaction::Transaction;
///
/// let tx = Transaction {
///     date: "2025-05-02".to_string(),
///     this_account: "Assets:Current:KB05".to_string(),
///     other_account: "Assets:Current:PCUS1".to_string(),
///     memo: "To term deposit".to_string(),
///     amount: Decimal::new(4200, 2),
///     ..Transaction::default()
/// };
/// assert!(tx.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    /// Сумма со знаком; отрицательная уменьшает баланс счёта-владельца.
    pub amount: Decimal,
    /// Тип транзакции; может быть пустым.
    pub code: String,
    /// Метка валюты; может быть пустой.
    pub currency: String,
    /// Дата в виде `YYYY-MM-DD`.
    pub date: String,
    /// Описание; обязательно.
    pub memo: String,
    /// Счёт-корреспондент.
    pub other_account: String,
    /// Счёт-владелец; обязателен.
    pub this_account: String,
}
