//! Формат записи CSV: раскладка колонок выписки конкретного банка.
//!
//! Каждой роли транзакции сопоставлен номер колонки, начиная с 1.
//! Номер `0` означает, что колонки с этой ролью в записи нет.
//!
//! Формат хранится в XML; имя корневого элемента не проверяется,
//! неизвестные элементы пропускаются, отсутствующие равны нулю:
//!
//! ```xml
//! <CSVRecordFormat>
//!   <NFields>5</NFields>
//!   <DateI>1</DateI>
//!   <MemoI>2</MemoI>
//!   <DebitI>3</DebitI>
//!   <CreditI>4</CreditI>
//!   <DateLayout>02/01/2006</DateLayout>
//! </CSVRecordFormat>
//! ```

use std::{fmt, fs, path::Path};

use serde::Deserialize;
use tracing::debug;

use crate::{date, error::ConfigError};

/// Минимальное число полей: дата, описание и сумма.
pub const MIN_FIELDS: u8 = 3;

/// Максимальное число полей.
pub const MAX_FIELDS: u8 = 20;

/// Роль колонки в записи.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Amount,
    Credit,
    Debit,
    Currency,
    Code,
    Date,
    Memo,
    OtherAccount,
    ThisAccount,
}

impl Role {
    /// Все роли в порядке проверки индексов.
    pub const ALL: [Self; 9] = [
        Self::Amount,
        Self::Credit,
        Self::Debit,
        Self::Currency,
        Self::Code,
        Self::Date,
        Self::Memo,
        Self::OtherAccount,
        Self::ThisAccount,
    ];

    /// Имя XML-элемента, хранящего индекс роли.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Amount => "AmountI",
            Self::Credit => "CreditI",
            Self::Debit => "DebitI",
            Self::Currency => "CurrencyI",
            Self::Code => "CodeI",
            Self::Date => "DateI",
            Self::Memo => "MemoI",
            Self::OtherAccount => "OtherAccountI",
            Self::ThisAccount => "ThisAccountI",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Описание раскладки колонок записи CSV.
///
/// Значение по умолчанию пустое (все индексы нулевые) и не проходит
/// [`validate`](Self::validate); канонический формат даёт [`canonical`](Self::canonical).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecordFormat {
    /// Число полей в записи.
    #[serde(rename = "NFields")]
    pub n_fields: u8,
    #[serde(rename = "AmountI")]
    pub amount: u8,
    #[serde(rename = "CreditI")]
    pub credit: u8,
    #[serde(rename = "DebitI")]
    pub debit: u8,
    #[serde(rename = "CurrencyI")]
    pub currency: u8,
    #[serde(rename = "CodeI")]
    pub code: u8,
    #[serde(rename = "DateI")]
    pub date: u8,
    #[serde(rename = "MemoI")]
    pub memo: u8,
    #[serde(rename = "OtherAccountI")]
    pub other_account: u8,
    #[serde(rename = "ThisAccountI")]
    pub this_account: u8,
    /// Шаблон даты в записях, например `02/01/2006`.
    #[serde(rename = "DateLayout")]
    pub date_layout: String,
    /// Символы, удаляемые из суммы перед разбором, например `$,`.
    #[serde(rename = "AmountPuncts")]
    pub amount_puncts: String,
}

impl RecordFormat {
    /// Канонический формат `modcsv`:
    /// `date,thisAccount,otherAccount,code,memo,amount,currency`.
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            n_fields: 7,
            date: 1,
            this_account: 2,
            other_account: 3,
            code: 4,
            memo: 5,
            amount: 6,
            currency: 7,
            date_layout: date::CANONICAL_LAYOUT.to_string(),
            ..Self::default()
        }
    }

    /// Разбирает формат из XML без проверки.
    pub fn from_xml(xml: &str) -> Result<Self, ConfigError> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Читает формат из файла и проверяет его.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        let format = Self::from_xml(&xml)?;
        format.validate()?;
        debug!(path = %path.display(), n_fields = format.n_fields, "record format loaded");
        Ok(format)
    }

    /// Индекс колонки роли (`0` — колонки нет).
    #[must_use]
    pub const fn index(&self, role: Role) -> u8 {
        match role {
            Role::Amount => self.amount,
            Role::Credit => self.credit,
            Role::Debit => self.debit,
            Role::Currency => self.currency,
            Role::Code => self.code,
            Role::Date => self.date,
            Role::Memo => self.memo,
            Role::OtherAccount => self.other_account,
            Role::ThisAccount => self.this_account,
        }
    }

    /// Есть ли в записи колонка с этой ролью.
    #[must_use]
    pub const fn has(&self, role: Role) -> bool {
        self.index(role) != 0
    }

    /// Значение колонки роли; для отсутствующей роли — пустая строка.
    pub(crate) fn column<'a, S: AsRef<str>>(&self, fields: &'a [S], role: Role) -> &'a str {
        match usize::from(self.index(role)) {
            0 => "",
            i => fields.get(i - 1).map_or("", |field| field.as_ref()),
        }
    }

    /// Проверяет формат. Останавливается на первой ошибке.
    ///
    /// Порядок проверок:
    ///
    /// 1. число полей в `MIN_FIELDS..=MAX_FIELDS`;
    /// 2. каждый индекс не больше числа полей, ненулевые индексы различны;
    /// 3. заданы индексы даты и описания;
    /// 4. задана сумма либо пара кредит/дебет;
    /// 5. шаблон даты, разобранный по самому себе, даёт `2006-01-02`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FIELDS..=MAX_FIELDS).contains(&self.n_fields) {
            return Err(ConfigError::FieldCountRange {
                n_fields: self.n_fields,
                min: MIN_FIELDS,
                max: MAX_FIELDS,
            });
        }

        let mut in_use: [Option<Role>; MAX_FIELDS as usize + 1] = [None; MAX_FIELDS as usize + 1];
        for role in Role::ALL {
            let index = self.index(role);
            if index > self.n_fields {
                return Err(ConfigError::IndexRange { role, index, n_fields: self.n_fields });
            }
            if index == 0 {
                continue;
            }
            if let Some(other) = in_use[usize::from(index)] {
                return Err(ConfigError::IndexCollision { role, other, index });
            }
            in_use[usize::from(index)] = Some(role);
        }

        if !self.has(Role::Date) {
            return Err(ConfigError::MissingDateRole);
        }
        if !self.has(Role::Memo) {
            return Err(ConfigError::MissingMemoRole);
        }

        if !self.has(Role::Amount) && !(self.has(Role::Credit) && self.has(Role::Debit)) {
            return Err(ConfigError::MissingAmountRole);
        }

        if !date::is_valid_layout(&self.date_layout) {
            return Err(ConfigError::InvalidDateLayout { layout: self.date_layout.clone() });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    /// Полная выписка Kiwibank.
    fn kiwibank() -> RecordFormat {
        RecordFormat {
            n_fields: 16,
            amount: 15,
            credit: 13,
            debit: 14,
            date: 2,
            memo: 3,
            other_account: 12,
            this_account: 1,
            date_layout: "02-01-2006".to_string(),
            ..RecordFormat::default()
        }
    }

    /// Выписка кредитного союза: кредит и дебет вместо суммы.
    fn pcu() -> RecordFormat {
        RecordFormat {
            n_fields: 5,
            credit: 4,
            debit: 3,
            date: 1,
            memo: 2,
            date_layout: "02/01/2006".to_string(),
            ..RecordFormat::default()
        }
    }

    #[test]
    fn known_formats_are_valid() {
        for format in [RecordFormat::canonical(), kiwibank(), pcu()] {
            assert!(format.validate().is_ok(), "{format:?}");
        }
    }

    #[test]
    fn default_format_is_invalid() {
        assert!(matches!(
            RecordFormat::default().validate(),
            Err(ConfigError::FieldCountRange { n_fields: 0, .. })
        ));
    }

    #[test]
    fn field_count_out_of_range() {
        let mut format = kiwibank();
        format.n_fields = MIN_FIELDS - 1;
        assert!(matches!(format.validate(), Err(ConfigError::FieldCountRange { .. })));

        format.n_fields = MAX_FIELDS + 1;
        assert!(matches!(format.validate(), Err(ConfigError::FieldCountRange { .. })));
    }

    #[test]
    fn index_beyond_field_count() {
        let mut format = kiwibank();
        format.amount = format.n_fields + 1;
        assert!(matches!(
            format.validate(),
            Err(ConfigError::IndexRange { role: Role::Amount, index: 17, n_fields: 16 })
        ));
    }

    #[test]
    fn shared_index_collides() {
        let mut format = kiwibank();
        format.credit = 1;
        format.debit = 1;
        assert!(matches!(
            format.validate(),
            Err(ConfigError::IndexCollision { role: Role::Debit, other: Role::Credit, index: 1 })
        ));
    }

    #[test]
    fn every_pair_of_roles_collides() {
        for (i, first) in Role::ALL.iter().enumerate() {
            for second in &Role::ALL[i + 1..] {
                let mut format = RecordFormat::canonical();
                format.n_fields = 20;
                format.amount = 10;
                format.credit = 11;
                format.debit = 12;
                format.currency = 13;
                format.code = 14;
                format.date = 15;
                format.memo = 16;
                format.other_account = 17;
                format.this_account = 18;
                assert!(format.validate().is_ok());

                let shared = format.index(*first);
                set_index(&mut format, *second, shared);
                assert!(
                    matches!(format.validate(), Err(ConfigError::IndexCollision { .. })),
                    "{first} and {second}"
                );
            }
        }
    }

    fn set_index(format: &mut RecordFormat, role: Role, index: u8) {
        let slot = match role {
            Role::Amount => &mut format.amount,
            Role::Credit => &mut format.credit,
            Role::Debit => &mut format.debit,
            Role::Currency => &mut format.currency,
            Role::Code => &mut format.code,
            Role::Date => &mut format.date,
            Role::Memo => &mut format.memo,
            Role::OtherAccount => &mut format.other_account,
            Role::ThisAccount => &mut format.this_account,
        };
        *slot = index;
    }

    #[test]
    fn date_and_memo_are_mandatory() {
        let mut format = kiwibank();
        format.date = 0;
        assert!(matches!(format.validate(), Err(ConfigError::MissingDateRole)));

        let mut format = pcu();
        format.memo = 0;
        assert!(matches!(format.validate(), Err(ConfigError::MissingMemoRole)));
    }

    #[test]
    fn amount_or_credit_and_debit_required() {
        let mut format = kiwibank();
        format.amount = 0;
        format.credit = 1;
        format.debit = 0;
        format.this_account = 0;
        assert!(matches!(format.validate(), Err(ConfigError::MissingAmountRole)));
    }

    #[test]
    fn date_layout_must_round_trip() {
        let mut format = kiwibank();
        format.date_layout = String::new();
        assert!(matches!(format.validate(), Err(ConfigError::InvalidDateLayout { .. })));

        format.date_layout = "gibberish".to_string();
        assert!(matches!(format.validate(), Err(ConfigError::InvalidDateLayout { .. })));
    }

    #[test]
    fn column_lookup_maps_zero_to_empty() {
        let format = pcu();
        let fields = ["07/01/2020", "Best of Health", "16.92", "", "265.01"];

        assert_eq!(format.column(&fields, Role::Date), "07/01/2020");
        assert_eq!(format.column(&fields, Role::Debit), "16.92");
        assert_eq!(format.column(&fields, Role::Amount), "");
        assert_eq!(format.column(&fields, Role::ThisAccount), "");
    }

    #[test]
    fn from_xml_defaults_missing_and_ignores_unknown() {
        let xml = r#"<CSVRecordFormat>
  <NFields>5</NFields>
  <DateI>1</DateI>
  <MemoI>2</MemoI>
  <DebitI>3</DebitI>
  <CreditI>4</CreditI>
  <Bank>Local Credit Union</Bank>
  <DateLayout>02/01/2006</DateLayout>
</CSVRecordFormat>"#;

        let format = RecordFormat::from_xml(xml).unwrap();
        assert_eq!(format, pcu());
        assert!(format.validate().is_ok());
    }

    #[test]
    fn from_xml_rejects_bad_numbers() {
        let xml = "<CSVRecordFormat><NFields>many</NFields></CSVRecordFormat>";
        assert!(matches!(RecordFormat::from_xml(xml), Err(ConfigError::Syntax(_))));
    }

    #[test]
    fn read_validates_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "<CSVRecordFormat><NFields>4</NFields><DateI>1</DateI><MemoI>2</MemoI>\
             <AmountI>3</AmountI><CurrencyI>4</CurrencyI>\
             <DateLayout>2006-01-02</DateLayout></CSVRecordFormat>"
        )
        .unwrap();

        let format = RecordFormat::read(file.path()).unwrap();
        assert_eq!(format.n_fields, 4);
        assert_eq!(format.currency, 4);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, "<CSVRecordFormat><NFields>4</NFields></CSVRecordFormat>").unwrap();
        assert!(matches!(RecordFormat::read(bad.path()), Err(ConfigError::MissingDateRole)));
    }

    #[test]
    fn read_missing_file() {
        let err = RecordFormat::read("/nonexistent/format.xml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
