//! Логика валидации транзакций.

use thiserror::Error;

use super::Transaction;
use crate::date::{self, CANONICAL_LAYOUT};

/// Ошибки, возникающие при валидации транзакции.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Нулевая сумма транзакции")]
    ZeroAmount,
    #[error("Некорректная дата: '{0}' (ожидается YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Пустое описание транзакции")]
    EmptyMemo,
    #[error("Не указан счёт-владелец")]
    EmptyThisAccount,
    #[error("Не указан счёт-корреспондент")]
    EmptyOtherAccount,
    #[error("Перевод с одинаковым источником и назначением: {0}")]
    SameAccounts(String),
}

impl Transaction {
    /// Проверяет инварианты транзакции.
    ///
    /// # Правила
    ///
    /// - сумма не равна нулю
    /// - дата — существующая дата в виде `YYYY-MM-DD`
    /// - описание, счёт-владелец и счёт-корреспондент непусты
    /// - счета различны
    ///
    /// # Возвращает
    ///
    /// `Ok(())` если все правила соблюдены, иначе первую нарушенную `Err(ValidationError)`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount.is_zero() {
            return Err(ValidationError::ZeroAmount);
        }

        let canonical = date::normalize(&self.date, CANONICAL_LAYOUT);
        if !canonical.is_ok_and(|d| d == self.date) {
            return Err(ValidationError::InvalidDate(self.date.clone()));
        }

        if self.memo.is_empty() {
            return Err(ValidationError::EmptyMemo);
        }
        if self.this_account.is_empty() {
            return Err(ValidationError::EmptyThisAccount);
        }
        if self.other_account.is_empty() {
            return Err(ValidationError::EmptyOtherAccount);
        }
        if self.this_account == self.other_account {
            return Err(ValidationError::SameAccounts(self.this_account.clone()));
        }

        Ok(())
    }

    /// Удобная обёртка над [`validate`](Self::validate).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
