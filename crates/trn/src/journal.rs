//! Журнал Ledger как последовательность записей.
//!
//! Запись начинается строкой, первый символ которой — цифра, и продолжается
//! строками, начинающимися с пробела или табуляции. Прочие строки
//! (комментарии, директивы, автоматические транзакции) отбрасываются.
//!
//! Строки записей сохраняются дословно; из заголовка разбираются только
//! дата, код и описание, нужные для слияния журналов.

use std::{
    fmt,
    io::{BufRead, Write},
};

use tracing::{debug, trace};

use crate::{
    error::{JournalError, LedgerError},
    transaction::Transaction,
};

/// Код, которым помечена зеркальная запись перевода между своими счетами.
pub const MIRROR_CODE: &str = "MT";

/// Одна запись журнала.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    lines: Vec<String>,
    header: Transaction,
}

impl LedgerEntry {
    /// Разбирает запись из её строк (без завершающих переводов строки).
    pub fn parse(lines: Vec<String>) -> Result<Self, LedgerError> {
        let header = Transaction::parse_ledger_header(lines.as_slice())?;
        Ok(Self { lines, header })
    }

    /// Исходные строки записи.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Дата, код и описание из заголовка.
    #[must_use]
    pub fn header(&self) -> &Transaction {
        &self.header
    }

    #[must_use]
    pub fn date(&self) -> &str {
        &self.header.date
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.header.code
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Записи одного или нескольких журналов.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Journal {
    entries: Vec<LedgerEntry>,
}

impl Journal {
    /// Читает журнал из потока строк.
    ///
    /// Останавливается на первой записи с неразборчивым заголовком.
    ///
    /// # Пример
    ///
    /// ```
    /// use trn::journal::Journal;
    ///
    /// let text = "\
    /// ; statement for May
    /// 2025-05-06 Groceries
    ///   Assets:Current  -20.00
    ///   Expenses:Food
    /// 2025-05-05 (MT) Transfer
    ///   Assets:Savings  100.00
    ///   Assets:Current
    /// ";
    /// let mut journal = Journal::parse(text.as_bytes()).unwrap();
    /// assert_eq!(journal.len(), 2);
    ///
    /// assert_eq!(journal.demirror("MT"), 1);
    /// assert_eq!(journal.entries()[0].date(), "2025-05-06");
    /// ```
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, JournalError> {
        let mut journal = Self::default();
        let mut lines: Vec<String> = Vec::new();
        let mut start = 0;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;

            if !lines.is_empty() {
                if line.starts_with([' ', '\t']) {
                    lines.push(line);
                    continue;
                }
                journal.push_entry(std::mem::take(&mut lines), start)?;
            }

            if line.starts_with(|c: char| c.is_ascii_digit()) {
                start = i + 1;
                lines.push(line);
            } else {
                trace!(line = i + 1, "line outside of an entry dropped");
            }
        }

        if !lines.is_empty() {
            journal.push_entry(lines, start)?;
        }

        debug!(entries = journal.len(), "journal parsed");
        Ok(journal)
    }

    fn push_entry(&mut self, lines: Vec<String>, line: usize) -> Result<(), JournalError> {
        let entry = LedgerEntry::parse(lines).map_err(|source| JournalError::Entry { line, source })?;
        self.entries.push(entry);
        Ok(())
    }

    /// Записи в текущем порядке.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Добавляет записи другого журнала в конец.
    pub fn append(&mut self, other: Journal) {
        self.entries.extend(other.entries);
    }

    /// Удаляет записи с кодом `code`. Возвращает число удалённых записей.
    pub fn demirror(&mut self, code: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.code() != code);
        let removed = before - self.entries.len();
        debug!(code, removed, "mirror entries removed");
        removed
    }

    /// Сортирует записи по дате. Записи с одной датой сохраняют порядок.
    pub fn sort_by_date(&mut self) {
        self.entries.sort_by(|a, b| a.date().cmp(b.date()));
    }

    /// Выводит строки всех записей.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for entry in &self.entries {
            write!(writer, "{entry}")?;
        }
        writer.flush()
    }
}
