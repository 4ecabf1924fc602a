//! Кодек CSV: запись выписки банка → [`Transaction`] → modcsv.
//!
//! Декодирование управляется [`RecordFormat`]; вывод всегда канонический:
//!
//! ```text
//! date,thisAccount,otherAccount,code,memo,amount,currency
//! ```
//!
//! Экранирование запятых не выполняется: данные считаются свободными от них.

use crate::{
    amount,
    date,
    error::DecodeError,
    format::{RecordFormat, Role},
    transaction::{DEFAULT_OTHER_ACCOUNT, Transaction},
};

/// Значения, заданные вызывающей стороной (например, флагами командной строки).
///
/// Непустое значение переопределяет колонку записи. Пустая строка
/// равносильна отсутствию значения.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Счёт-владелец выписки.
    pub this_account: Option<String>,
    /// Валюта всех транзакций.
    pub currency: Option<String>,
}

impl Overrides {
    /// Задаёт счёт-владелец.
    #[must_use]
    pub fn with_this_account(mut self, account: impl Into<String>) -> Self {
        self.this_account = Some(account.into());
        self
    }

    /// Задаёт валюту.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    fn this_account(&self) -> Option<&str> {
        self.this_account.as_deref().filter(|s| !s.is_empty())
    }

    fn currency(&self) -> Option<&str> {
        self.currency.as_deref().filter(|s| !s.is_empty())
    }
}

impl Transaction {
    /// Строит транзакцию из полей одной записи CSV.
    ///
    /// `format` должен быть проверен через [`RecordFormat::validate`].
    ///
    /// # Правила
    ///
    /// - число полей равно `format.n_fields`
    /// - дата разбирается по `format.date_layout`
    /// - сумма берётся из amount или из пары credit/debit; ноль отвергается
    /// - валюта и счёт-владелец из `overrides` важнее колонок
    /// - пустой счёт-корреспондент заменяется на [`DEFAULT_OTHER_ACCOUNT`]
    ///
    /// # Пример
    ///
    /// ```
    /// use trn::prelude::*;
    ///
    /// let format = RecordFormat::canonical();
    /// let fields = ["2025-05-02", "Assets:Current:KB05", "Assets:Current:PCUS1", "", "To term deposit", "42.00", ""];
    ///
    /// let tx = Transaction::decode_csv(&fields, &format, &Overrides::default()).unwrap();
    /// assert_eq!(tx.encode_csv(), format!("{}\n", fields.join(",")));
    /// ```
    pub fn decode_csv<S: AsRef<str>>(
        fields: &[S],
        format: &RecordFormat,
        overrides: &Overrides,
    ) -> Result<Self, DecodeError> {
        if fields.len() != usize::from(format.n_fields) {
            return Err(DecodeError::FieldCountMismatch {
                expected: format.n_fields,
                actual: fields.len(),
            });
        }
        let column = |role: Role| format.column(fields, role);

        let date = date::normalize(column(Role::Date), &format.date_layout)?;

        let amount = amount::resolve_amount(
            column(Role::Amount),
            column(Role::Credit),
            column(Role::Debit),
            &format.amount_puncts,
        )?;
        if amount.is_zero() {
            return Err(DecodeError::ZeroAmount);
        }

        let code = column(Role::Code).to_string();
        let currency = overrides.currency().unwrap_or_else(|| column(Role::Currency)).to_string();

        let memo = column(Role::Memo);
        if memo.is_empty() {
            return Err(DecodeError::EmptyMemo);
        }

        let other_account = match column(Role::OtherAccount) {
            "" => DEFAULT_OTHER_ACCOUNT,
            account => account,
        };

        let this_account = match overrides.this_account() {
            Some(account) => account,
            None => match column(Role::ThisAccount) {
                "" => return Err(DecodeError::MissingThisAccount),
                account => account,
            },
        };
        if this_account == DEFAULT_OTHER_ACCOUNT {
            return Err(DecodeError::InvalidThisAccount(this_account.to_string()));
        }

        Ok(Self {
            amount,
            code,
            currency,
            date,
            memo: memo.to_string(),
            other_account: other_account.to_string(),
            this_account: this_account.to_string(),
        })
    }

    /// Выводит транзакцию строкой modcsv с завершающим переводом строки.
    #[must_use]
    pub fn encode_csv(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}\n",
            self.date,
            self.this_account,
            self.other_account,
            self.code,
            self.memo,
            self.amount,
            self.currency
        )
    }
}
