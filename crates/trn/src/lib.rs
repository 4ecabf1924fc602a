//! Библиотека преобразования финансовых транзакций.
//!
//! Крейт переводит записи банковских выписок между тремя текстовыми формами:
//!
//! - **CSV банка** — произвольная раскладка колонок, описанная [`RecordFormat`]
//! - **modcsv** — канонический CSV: `date,thisAccount,otherAccount,code,memo,amount,currency`
//! - **Ledger** — запись журнала из трёх строк (заголовок и две проводки)
//!
//! # Быстрый старт
//!
//! ```
//! use trn::prelude::*;
//!
//! let format = RecordFormat::canonical();
//! format.validate().unwrap();
//!
//! let fields = ["2025-05-05", "ABC", "XYZ", "", "Transfer", "-1.23", ""];
//! let tx = Transaction::decode_csv(&fields, &format, &Overrides::default()).unwrap();
//!
//! assert_eq!(tx.encode_ledger(), "2025-05-05 Transfer\n  ABC  -1.23\n  XYZ\n");
//! ```
//!
//! [`RecordFormat`]: format::RecordFormat

pub mod amount;
pub mod codec;
pub mod date;
pub mod error;
pub mod format;
pub mod journal;
pub mod reader;
pub mod transaction;
pub mod writer;

/// Часто используемые типы одним импортом.
pub mod prelude {
    pub use crate::{
        codec::{LedgerDialect, OutputFormat, Overrides},
        error::{
            AmountError, ConfigError, DateError, DecodeError, JournalError, LedgerError, RecordError,
        },
        format::{RecordFormat, Role},
        journal::{Journal, LedgerEntry, MIRROR_CODE},
        reader::RecordReader,
        transaction::{DEFAULT_OTHER_ACCOUNT, Transaction, ValidationError},
        writer::{TransactionWriter, ensure_ascending},
    };
}
