//! Нормализация дат.
//!
//! Шаблон даты записывается как опорная дата 2 января 2006 года в нужном
//! виде: `02/01/2006`, `2006-01-02`, `Jan 2 2006`. Шаблон переводится в
//! директивы `strptime` и разбирается через [`jiff::civil::Date`], поэтому
//! несуществующие даты (13-й месяц, 31 февраля) отвергаются.
//!
//! | Элемент   | Значение                          |
//! |-----------|-----------------------------------|
//! | `2006`    | год, 4 цифры                      |
//! | `06`      | год, 2 цифры                      |
//! | `01`, `1` | месяц с ведущим нулём и без       |
//! | `Jan`     | сокращённое название месяца       |
//! | `January` | полное название месяца            |
//! | `02`, `2` | день с ведущим нулём и без        |
//! | `_2`      | день, дополненный пробелом        |
//! | `Mon`     | сокращённое название дня недели   |
//! | `Monday`  | полное название дня недели        |
//!
//! Элементы времени суток (`15`, `03`, `04`, `05`, `3`, `4`, `5`) не
//! поддерживаются. Остальной текст шаблона сравнивается буквально.
//!
//! Текст должен быть записан в точности по шаблону: `01`, `02` и `06`
//! требуют двух цифр, `2006` четырёх. Элементы без ведущего нуля (`1`, `2`)
//! принимают и одну, и две цифры. Названия месяцев и дней недели
//! сравниваются без учёта регистра.
//!
//! Шаблон с `_2` не проходит [`is_valid_layout`]: сам по себе он не
//! разбирается как дата, поэтому для описания формата записи не годится.

use jiff::{civil::Date, fmt::strtime};

use crate::error::DateError;

/// Канонический шаблон даты, `YYYY-MM-DD`.
pub const CANONICAL_LAYOUT: &str = "2006-01-02";

/// Элементы шаблона в порядке распознавания: длинные раньше коротких.
/// `None` означает элемент времени суток.
const ELEMENTS: &[(&str, Option<&str>)] = &[
    ("January", Some("%B")),
    ("Jan", Some("%b")),
    ("Monday", Some("%A")),
    ("Mon", Some("%a")),
    ("2006", Some("%Y")),
    ("_2", Some("%e")),
    ("01", Some("%m")),
    ("02", Some("%d")),
    ("06", Some("%y")),
    ("03", None),
    ("04", None),
    ("05", None),
    ("15", None),
    ("1", Some("%-m")),
    ("2", Some("%-d")),
    ("3", None),
    ("4", None),
    ("5", None),
];

/// Часть шаблона.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Directive(&'static str),
    Literal(char),
}

/// Разбирает `text` по шаблону `layout` и возвращает дату в виде `YYYY-MM-DD`.
///
/// # Пример
///
/// ```
/// use trn::date::normalize;
///
/// assert_eq!(normalize("07/01/2020", "02/01/2006").unwrap(), "2020-01-07");
/// assert!(normalize("2020-13-01", "2006-01-02").is_err());
/// assert!(normalize("7/1/2020", "02/01/2006").is_err());
/// ```
pub fn normalize(text: &str, layout: &str) -> Result<String, DateError> {
    let pieces = layout_pieces(layout)?;
    let date = Date::strptime(strptime_format(&pieces), text).map_err(|source| {
        DateError::Mismatch { text: text.to_string(), layout: layout.to_string(), source }
    })?;

    // strptime допускает меньше цифр, чем задаёт элемент шаблона.
    if !is_exact(date, &pieces, text) {
        return Err(DateError::Inexact { text: text.to_string(), layout: layout.to_string() });
    }

    Ok(date.to_string())
}

/// Проверяет, что шаблон, разобранный как дата по самому себе, даёт
/// канонический шаблон. Только такие шаблоны пригодны для разбора.
#[must_use]
pub fn is_valid_layout(layout: &str) -> bool {
    normalize(layout, layout).is_ok_and(|canonical| canonical == CANONICAL_LAYOUT)
}

/// Разбивает шаблон опорной даты на директивы `strptime` и буквальные символы.
fn layout_pieces(layout: &str) -> Result<Vec<Piece>, DateError> {
    let mut pieces = Vec::with_capacity(layout.len());
    let mut rest = layout;

    'outer: while let Some(c) = rest.chars().next() {
        for &(element, directive) in ELEMENTS {
            if let Some(tail) = rest.strip_prefix(element) {
                let Some(directive) = directive else {
                    return Err(DateError::UnsupportedElement {
                        layout: layout.to_string(),
                        element,
                    });
                };
                pieces.push(Piece::Directive(directive));
                rest = tail;
                continue 'outer;
            }
        }

        pieces.push(Piece::Literal(c));
        rest = &rest[c.len_utf8()..];
    }

    Ok(pieces)
}

fn strptime_format(pieces: &[Piece]) -> String {
    let mut format = String::with_capacity(pieces.len() * 2);
    for piece in pieces {
        match *piece {
            Piece::Directive(directive) => format.push_str(directive),
            Piece::Literal('%') => format.push_str("%%"),
            Piece::Literal(c) => format.push(c),
        }
    }
    format
}

/// Сверяет текст с датой, выведенной обратно по частям шаблона.
fn is_exact(date: Date, pieces: &[Piece], text: &str) -> bool {
    let mut rest = text;
    for piece in pieces {
        let tail = match *piece {
            Piece::Literal(c) => rest.strip_prefix(c),
            Piece::Directive(directive) => strip_rendered(date, directive, rest),
        };
        let Some(tail) = tail else {
            return false;
        };
        rest = tail;
    }
    rest.is_empty()
}

/// Отрезает от `text` значение `directive` для `date`.
///
/// `%-m` и `%-d` принимают и вид с ведущим нулём, `%e` и вид без пробела.
fn strip_rendered<'a>(date: Date, directive: &str, text: &'a str) -> Option<&'a str> {
    let rendered = strtime::format(directive, date).ok()?;
    let mut forms = vec![rendered.clone()];
    match directive {
        "%-m" | "%-d" if rendered.len() == 1 => forms.insert(0, format!("0{rendered}")),
        "%e" => forms.push(rendered.trim_start().to_string()),
        _ => {}
    }

    forms.iter().find_map(|form| {
        let (head, tail) = text.split_at_checked(form.len())?;
        head.eq_ignore_ascii_case(form).then_some(tail)
    })
}
