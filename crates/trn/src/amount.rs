//! Вычисление суммы транзакции из колонок amount, credit и debit.

use std::{borrow::Cow, str::FromStr};

use rust_decimal::Decimal;

use crate::{error::AmountError, format::Role};

/// Вычисляет знаковую сумму.
///
/// Порядок правил:
///
/// 1. непустой `amount` разбирается как число с любым знаком;
/// 2. иначе ровно один из `credit`/`debit` должен быть непуст и строго
///    положителен; дебет меняет знак;
/// 3. иначе [`AmountError::CreditDebitConflict`].
///
/// Перед разбором из текста удаляются символы `puncts` (например `"$,"`).
/// Нулевую сумму из `amount` отвергает вызывающая сторона.
///
/// # Пример
///
/// ```
/// use rust_decimal::Decimal;
/// use trn::amount::resolve_amount;
///
/// let debit = resolve_amount("", "", "16.92", "").unwrap();
/// assert_eq!(debit, Decimal::new(-1692, 2));
///
/// let amount = resolve_amount("$5,432.10", "", "", "$,").unwrap();
/// assert_eq!(amount, Decimal::new(543210, 2));
/// ```
pub fn resolve_amount(
    amount: &str,
    credit: &str,
    debit: &str,
    puncts: &str,
) -> Result<Decimal, AmountError> {
    match (amount.is_empty(), credit.is_empty(), debit.is_empty()) {
        (false, _, _) => parse_decimal(Role::Amount, amount, puncts),
        (true, false, true) => parse_positive(Role::Credit, credit, puncts),
        (true, true, false) => parse_positive(Role::Debit, debit, puncts).map(|v| -v),
        _ => Err(AmountError::CreditDebitConflict {
            credit: credit.to_string(),
            debit: debit.to_string(),
        }),
    }
}

/// Удаляет из текста все символы `puncts`.
#[must_use]
pub fn depunct<'a>(text: &'a str, puncts: &str) -> Cow<'a, str> {
    if puncts.is_empty() || !text.contains(|c: char| puncts.contains(c)) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|c| !puncts.contains(*c)).collect())
}

fn parse_decimal(role: Role, text: &str, puncts: &str) -> Result<Decimal, AmountError> {
    let clean = depunct(text, puncts);
    // Decimal::from_str пропускает разделители разрядов `_`.
    if clean.contains('_') {
        return Err(AmountError::NumberSyntax { role, text: text.to_string() });
    }
    Decimal::from_str(&clean)
        .or_else(|_| Decimal::from_scientific(&clean))
        .map_err(|_| AmountError::NumberSyntax { role, text: text.to_string() })
}

fn parse_positive(role: Role, text: &str, puncts: &str) -> Result<Decimal, AmountError> {
    let value = parse_decimal(role, text, puncts)?;
    if value <= Decimal::ZERO {
        return Err(AmountError::NotPositive { role, value });
    }
    Ok(value)
}
