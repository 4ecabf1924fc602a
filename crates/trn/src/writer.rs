//! Потоковый writer транзакций.
//!
//! Предоставляет [`TransactionWriter`] для вывода транзакций в формате
//! [`OutputFormat`] в любой тип, реализующий [`Write`].

use std::io::{self, BufWriter, Write};

use crate::{codec::OutputFormat, transaction::Transaction};

/// Потоковый writer транзакций.
///
/// # Пример
///
/// ```
/// use trn::prelude::*;
///
/// let tx = Transaction {
///     date: "2025-05-05".to_string(),
///     this_account: "ABC".to_string(),
///     other_account: "XYZ".to_string(),
///     memo: "Transfer".to_string(),
///     amount: "-1.23".parse().unwrap(),
///     ..Transaction::default()
/// };
///
/// let mut writer = TransactionWriter::new(Vec::new(), OutputFormat::Csv);
/// writer.write(&tx).unwrap();
/// let out = writer.into_inner().unwrap();
/// assert_eq!(out, b"2025-05-05,ABC,XYZ,,Transfer,-1.23,\n");
/// ```
pub struct TransactionWriter<W: Write> {
    inner: BufWriter<W>,
    format: OutputFormat,
    /// Счётчик записанных транзакций.
    records_written: usize,
}

impl<W: Write> TransactionWriter<W> {
    /// Создаёт новый writer.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { inner: BufWriter::new(writer), format, records_written: 0 }
    }

    /// Создаёт writer с указанным размером буфера.
    pub fn with_capacity(capacity: usize, writer: W, format: OutputFormat) -> Self {
        Self { inner: BufWriter::with_capacity(capacity, writer), format, records_written: 0 }
    }

    /// Записывает одну транзакцию.
    pub fn write(&mut self, tx: &Transaction) -> io::Result<()> {
        self.inner.write_all(tx.encode(self.format).as_bytes())?;
        self.records_written += 1;
        Ok(())
    }

    /// Записывает несколько транзакций.
    pub fn write_all(&mut self, txs: &[Transaction]) -> io::Result<()> {
        for tx in txs {
            self.write(tx)?;
        }
        Ok(())
    }

    /// Принудительно сбрасывает буфер.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Формат вывода.
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Возвращает количество записанных транзакций.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Получает ссылку на внутренний writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        self.inner.get_ref()
    }

    /// Извлекает внутренний writer (с предварительным flush).
    pub fn into_inner(self) -> Result<W, io::IntoInnerError<BufWriter<W>>> {
        self.inner.into_inner()
    }
}

/// Приводит пакет транзакций к порядку по возрастанию даты.
///
/// Выписки приходят отсортированными по дате в одну или другую сторону;
/// если первая дата позже последней, пакет разворачивается.
/// Возвращает `true`, если порядок был изменён.
pub fn ensure_ascending(txs: &mut [Transaction]) -> bool {
    let reversed = match (txs.first(), txs.last()) {
        (Some(first), Some(last)) => first.date > last.date,
        _ => false,
    };
    if reversed {
        txs.reverse();
    }
    reversed
}
