//! Кодек журнала Ledger.
//!
//! Запись журнала состоит из заголовка и двух проводок:
//!
//! ```text
//! 2023-12-29 * (AP) Automatic Payment Rates
//!   Assets:Current:KB05  $-162.00
//!   Expenses:Rates
//! ```
//!
//! Заголовок: `дата[=дата_учёта] [*|!] [(код)] описание`. Разбор нестрогий:
//! всё, что не распознано как отметка статуса или код, попадает в описание.

use crate::{
    date::{self, CANONICAL_LAYOUT},
    error::LedgerError,
    transaction::Transaction,
};

/// Отметки статуса записи: `*` — проведена, `!` — ожидает.
const STATUS_MARKS: [&str; 2] = ["*", "!"];

/// Соглашения о записи кода и валюты.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerDialect {
    /// Открывающая скобка кода.
    pub code_start: String,
    /// Закрывающая скобка кода.
    pub code_end: String,
    /// Валюта, которая пишется слитно перед суммой; остальные идут после суммы.
    pub prefix_currency: String,
}

impl Default for LedgerDialect {
    fn default() -> Self {
        Self {
            code_start: "(".to_string(),
            code_end: ")".to_string(),
            prefix_currency: "$".to_string(),
        }
    }
}

impl LedgerDialect {
    /// Внутренность кода, если токен им является.
    fn unwrap_code<'a>(&self, token: &'a str) -> Option<&'a str> {
        if token.chars().count() < 3 {
            return None;
        }
        token
            .strip_prefix(self.code_start.as_str())
            .and_then(|rest| rest.strip_suffix(self.code_end.as_str()))
            .filter(|inner| !inner.is_empty())
    }

    /// Код в скобках; недостающие скобки добавляются.
    fn wrap_code(&self, code: &str) -> String {
        let mut wrapped = String::with_capacity(code.len() + 2);
        if !code.starts_with(self.code_start.as_str()) {
            wrapped.push_str(&self.code_start);
        }
        wrapped.push_str(code);
        if !code.ends_with(self.code_end.as_str()) {
            wrapped.push_str(&self.code_end);
        }
        wrapped
    }
}

impl Transaction {
    /// Разбирает заголовок записи журнала с диалектом по умолчанию.
    ///
    /// # Пример
    ///
    /// ```
    /// use trn::transaction::Transaction;
    ///
    /// let tx = Transaction::parse_ledger_header(&["2023-12-29 * (AP) Automatic Payment Rates"]).unwrap();
    /// assert_eq!(tx.date, "2023-12-29");
    /// assert_eq!(tx.code, "AP");
    /// assert_eq!(tx.memo, "Automatic Payment Rates");
    /// ```
    pub fn parse_ledger_header<S: AsRef<str>>(lines: &[S]) -> Result<Self, LedgerError> {
        Self::parse_ledger_header_with(lines, &LedgerDialect::default())
    }

    /// Разбирает первую строку записи журнала.
    ///
    /// Заполняются только дата, код и описание; строки проводок не читаются.
    pub fn parse_ledger_header_with<S: AsRef<str>>(
        lines: &[S],
        dialect: &LedgerDialect,
    ) -> Result<Self, LedgerError> {
        let line = lines.first().map_or("", |line| line.as_ref());
        if !line.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(LedgerError::NotAnEntryStart { line: line.to_string() });
        }

        let mut tokens = line.split_whitespace().peekable();
        let date_spec = tokens.next().unwrap_or_default();
        let actual = date_spec.split('=').next().unwrap_or_default();
        let date = date::normalize(actual, CANONICAL_LAYOUT)?;

        tokens.next_if(|token| STATUS_MARKS.contains(token));

        let code = match tokens.peek().and_then(|token| dialect.unwrap_code(token)) {
            Some(inner) => {
                tokens.next();
                inner.to_string()
            }
            None => String::new(),
        };

        let memo = tokens.collect::<Vec<_>>().join(" ");

        Ok(Self { code, date, memo, ..Self::default() })
    }

    /// Выводит запись журнала с диалектом по умолчанию.
    #[must_use]
    pub fn encode_ledger(&self) -> String {
        self.encode_ledger_with(&LedgerDialect::default())
    }

    /// Выводит запись журнала из трёх строк.
    #[must_use]
    pub fn encode_ledger_with(&self, dialect: &LedgerDialect) -> String {
        let mut header = self.date.clone();
        if !self.code.is_empty() {
            header.push(' ');
            header.push_str(&dialect.wrap_code(&self.code));
        }

        let amount = match self.currency.as_str() {
            "" => self.amount.to_string(),
            currency if currency == dialect.prefix_currency => format!("{currency}{}", self.amount),
            currency => format!("{} {currency}", self.amount),
        };

        format!(
            "{header} {}\n  {}  {amount}\n  {}\n",
            self.memo, self.this_account, self.other_account
        )
    }
}
