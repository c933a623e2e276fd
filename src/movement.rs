use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::Locale;

/// A financial event about to be written into a contract's history.
///
/// The durable record is the rendered text line, not this struct: amounts,
/// dates and the operation kind survive only as substrings, and the parser in
/// [`crate::parser`] recovers them later. `to_line` is therefore a
/// write-compatibility surface and its templates must stay stable.
#[derive(Debug, Clone, PartialEq)]
pub enum Movement {
    Disbursement {
        date: NaiveDate,
        amount: Money,
    },
    Renewal {
        date: NaiveDate,
        interest: Money,
        penalty: Money,
    },
    Installment {
        date: NaiveDate,
        number: u32,
        total: u32,
        amount: Money,
        penalty: Money,
    },
    Settlement {
        date: NaiveDate,
        total: Money,
        penalty: Money,
    },
    Agreement {
        date: NaiveDate,
        total: Money,
        installments: u32,
    },
}

impl Movement {
    /// render the movement as a human-readable ledger line in the given locale
    pub fn to_line(&self, locale: Locale) -> String {
        let marker = locale.currency_marker();
        match self {
            Movement::Disbursement { date, amount } => {
                let verb = match locale {
                    Locale::Portuguese => "liberado",
                    Locale::English => "disbursed",
                    Locale::Spanish => "entregado",
                };
                format!(
                    "{}: Capital {} {} {}",
                    fmt_date(*date, locale),
                    marker,
                    amount.to_display(),
                    verb
                )
            }
            Movement::Renewal { date, interest, penalty } => {
                let (word, interest_word) = match locale {
                    Locale::Portuguese => ("Renovação", "Juros"),
                    Locale::English => ("Renewal", "Interest"),
                    Locale::Spanish => ("Renovación", "Interés"),
                };
                format!(
                    "{}: {} - {} {} {}{}",
                    fmt_date(*date, locale),
                    word,
                    interest_word,
                    marker,
                    interest.to_display(),
                    penalty_suffix(*penalty, locale)
                )
            }
            Movement::Installment { date, number, total, amount, penalty } => {
                let (word, received) = match locale {
                    Locale::Portuguese => ("Parcela", "Recebido"),
                    Locale::English => ("Installment", "Received"),
                    Locale::Spanish => ("Cuota", "Recibido"),
                };
                format!(
                    "{}: {} {}/{} {} {} {}{}",
                    fmt_date(*date, locale),
                    word,
                    number,
                    total,
                    received,
                    marker,
                    amount.to_display(),
                    penalty_suffix(*penalty, locale)
                )
            }
            Movement::Settlement { date, total, penalty } => {
                let word = match locale {
                    Locale::Portuguese => "QUITADO",
                    Locale::English => "SETTLED",
                    Locale::Spanish => "LIQUIDADO",
                };
                format!(
                    "{}: {} - Total {} {}{}",
                    fmt_date(*date, locale),
                    word,
                    marker,
                    total.to_display(),
                    penalty_suffix(*penalty, locale)
                )
            }
            Movement::Agreement { date, total, installments } => {
                let (word, preposition) = match locale {
                    Locale::Portuguese => ("Acordo", "em"),
                    Locale::English => ("Agreement", "in"),
                    Locale::Spanish => ("Acuerdo", "en"),
                };
                format!(
                    "{}: {} - {} {} {} {}x",
                    fmt_date(*date, locale),
                    word,
                    marker,
                    total.to_display(),
                    preposition,
                    installments
                )
            }
        }
    }
}

fn fmt_date(date: NaiveDate, locale: Locale) -> String {
    date.format(locale.date_format()).to_string()
}

fn penalty_suffix(penalty: Money, locale: Locale) -> String {
    if !penalty.is_positive() {
        return String::new();
    }
    let word = match locale {
        Locale::Portuguese | Locale::Spanish => "Multa",
        Locale::English => "Penalty",
    };
    format!(" + {} {} {}", word, locale.currency_marker(), penalty.to_display())
}

/// Ordered, append-only history of a contract.
///
/// Most recent line first; lines are only ever prepended, never mutated or
/// reordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementLog {
    lines: Vec<String>,
}

impl MovementLog {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// prepend one rendered movement line
    pub fn record(&mut self, line: String) {
        self.lines.insert(0, line);
    }

    /// most recent line, if any
    pub fn latest(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// most-recent-first iteration
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
