//! Потоковое чтение выписки CSV.
//!
//! Предоставляет [`RecordReader`] — итератор, который превращает записи
//! CSV из любого источника, реализующего [`Read`], в транзакции.

use std::io::Read;

use tracing::{debug, trace};

use crate::{
    codec::Overrides,
    error::RecordError,
    format::RecordFormat,
    transaction::Transaction,
};

/// Потоковый reader выписки.
///
/// Ошибка декодирования одной записи ([`RecordError::Decode`]) не
/// прерывает чтение: итератор выдаёт её и переходит к следующей записи.
/// Ошибка самого потока CSV ([`RecordError::Csv`]) завершает итерацию.
///
/// # Пример
///
/// ```
/// use trn::prelude::*;
///
/// let input = "2025-05-02,KB05,PCUS1,,To term deposit,42.00,\nnot,a,record\n";
/// let mut reader = RecordReader::new(input.as_bytes(), RecordFormat::canonical(), Overrides::default());
///
/// assert!(reader.next().unwrap().is_ok());
/// assert!(reader.next().unwrap().unwrap_err().is_recoverable());
/// assert!(reader.next().is_none());
/// assert_eq!(reader.records_read(), 1);
/// assert_eq!(reader.records_skipped(), 1);
/// ```
pub struct RecordReader<R> {
    inner: ::csv::Reader<R>,
    format: RecordFormat,
    overrides: Overrides,
    record: ::csv::StringRecord,
    /// Счётчик успешно декодированных записей.
    records_read: usize,
    /// Счётчик отвергнутых записей.
    records_skipped: usize,
    finished: bool,
}

impl<R: Read> RecordReader<R> {
    /// Создаёт reader. `format` должен быть проверен заранее.
    ///
    /// Заголовок не ожидается: строка заголовка, как и любая другая
    /// непригодная запись, выдаётся как [`RecordError::Decode`].
    pub fn new(reader: R, format: RecordFormat, overrides: Overrides) -> Self {
        let inner = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        Self {
            inner,
            format,
            overrides,
            record: ::csv::StringRecord::new(),
            records_read: 0,
            records_skipped: 0,
            finished: false,
        }
    }

    /// Возвращает количество успешно декодированных записей.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Возвращает количество отвергнутых записей.
    #[must_use]
    pub fn records_skipped(&self) -> usize {
        self.records_skipped
    }

    /// Формат, по которому декодируются записи.
    #[must_use]
    pub fn format(&self) -> &RecordFormat {
        &self.format
    }

    /// Получает ссылку на внутренний reader.
    #[must_use]
    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    /// Извлекает внутренний reader.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Transaction, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.inner.read_record(&mut self.record) {
            Ok(true) => {}
            Ok(false) => {
                self.finished = true;
                debug!(
                    read = self.records_read,
                    skipped = self.records_skipped,
                    "end of statement"
                );
                return None;
            }
            Err(e) => {
                self.finished = true;
                return Some(Err(e.into()));
            }
        }

        let line = self.record.position().map_or(0, ::csv::Position::line);
        let fields: Vec<&str> = self.record.iter().collect();

        match Transaction::decode_csv(&fields, &self.format, &self.overrides) {
            Ok(tx) => {
                self.records_read += 1;
                trace!(line, date = %tx.date, amount = %tx.amount, "record decoded");
                Some(Ok(tx))
            }
            Err(source) => {
                self.records_skipped += 1;
                Some(Err(RecordError::Decode { line, source }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::error::DecodeError;

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
    fn reads_all_records() {
        let input = "\
07/01/2020,554PHP 18832946 Best of Health,16.92,,265.01
08/01/2020,\"Salary, January\",,1234.50,1499.51
";
        let overrides = Overrides::default().with_this_account("PCUS1");
        let reader = RecordReader::new(input.as_bytes(), pcu(), overrides);

        let txs: Vec<Transaction> = reader.collect::<Result<_, _>>().unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].amount, Decimal::new(-1692, 2));
        assert_eq!(txs[1].memo, "Salary, January");
        assert_eq!(txs[1].amount, Decimal::new(123450, 2));
    }

    #[test]
    fn header_line_is_skipped_with_line_number() {
        let input = "\
Date,Memo,Debit,Credit,Balance
07/01/2020,Best of Health,16.92,,265.01
";
        let overrides = Overrides::default().with_this_account("PCUS1");
        let mut reader = RecordReader::new(input.as_bytes(), pcu(), overrides);

        let err = reader.next().unwrap().unwrap_err();
        assert!(err.is_recoverable());
        assert!(matches!(err, RecordError::Decode { line: 1, source: DecodeError::Date(_) }));

        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().is_none());
        assert_eq!(reader.records_read(), 1);
        assert_eq!(reader.records_skipped(), 1);
    }

    #[test]
    fn short_record_is_reported() {
        let input = "07/01/2020,Best of Health,16.92\n";
        let overrides = Overrides::default().with_this_account("PCUS1");
        let mut reader = RecordReader::new(input.as_bytes(), pcu(), overrides);

        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            RecordError::Decode {
                line: 1,
                source: DecodeError::FieldCountMismatch { expected: 5, actual: 3 }
            }
        ));
    }

    #[test]
    fn empty_input() {
        let mut reader =
            RecordReader::new(&b""[..], RecordFormat::canonical(), Overrides::default());
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
        assert_eq!(reader.records_read(), 0);
    }

    #[test]
    fn invalid_utf8_stops_reading() {
        let input: &[u8] = b"2025-05-02,KB05,PCUS1,,\xff\xfe,42.00,\n2025-05-03,KB05,PCUS1,,Ok,1.00,\n";
        let mut reader = RecordReader::new(input, RecordFormat::canonical(), Overrides::default());

        let err = reader.next().unwrap().unwrap_err();
        assert!(!err.is_recoverable());
        assert!(reader.next().is_none());
    }
}
