use chrono::NaiveDate;
use serde::Serialize;

use crate::contract::Contract;
use crate::decimal::Money;
use crate::parser::{LedgerLineParser, CAPITAL_LABELS, INTEREST_LABELS, PENALTY_LABELS};
use crate::types::{ContractId, MovementKind};

/// one cash event recovered from a movement line, split into portions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub contract_id: ContractId,
    pub date: NaiveDate,
    pub kind: MovementKind,
    /// everything received in the event, penalty included
    pub gross: Money,
    pub principal: Money,
    pub interest: Money,
    pub penalty: Money,
    pub line: String,
}

/// aggregate over every movement line of a set of contracts in a date range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_disbursed: Money,
    pub total_cash_received: Money,
    pub principal_recovered: Money,
    pub net_interest: Money,
    pub penalties_collected: Money,
    /// lines inside the log that yielded no date or no currency amount; the
    /// report never fails over them, it only makes the gap visible
    pub skipped_lines: u32,
    pub rows: Vec<ReportRow>,
}

impl LedgerReport {
    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Re-derives financial aggregates from the text movement logs.
///
/// The logs are the durable record; the builder re-parses every line rather
/// than trusting the contracts' accumulator fields, so the report reflects
/// exactly what the logs say, including their gaps.
pub struct ReportBuilder {
    parser: LedgerLineParser,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            parser: LedgerLineParser::new(),
        }
    }

    /// Build the report for `contracts` over the inclusive `[start, end]`
    /// date range.
    pub fn build(&self, contracts: &[Contract], start: NaiveDate, end: NaiveDate) -> LedgerReport {
        let mut report = LedgerReport {
            start,
            end,
            total_disbursed: Money::ZERO,
            total_cash_received: Money::ZERO,
            principal_recovered: Money::ZERO,
            net_interest: Money::ZERO,
            penalties_collected: Money::ZERO,
            skipped_lines: 0,
            rows: Vec::new(),
        };

        for contract in contracts {
            for line in contract.movements.iter() {
                self.fold_line(&mut report, contract, line);
            }
        }

        report
    }

    fn fold_line(&self, report: &mut LedgerReport, contract: &Contract, line: &str) {
        let parsed = self.parser.parse(line);

        if !parsed.contributes() {
            report.skipped_lines += 1;
            return;
        }
        let date = match parsed.date {
            Some(d) if d >= report.start && d <= report.end => d,
            _ => return, // outside the range, not a data problem
        };

        match parsed.kind {
            Some(MovementKind::Disbursement) => {
                report.total_disbursed += parsed.amount;
            }
            Some(kind) if parsed.is_cash_event => {
                let row = self.split(contract, kind, date, parsed.amount, line);
                report.total_cash_received += row.gross;
                report.principal_recovered += row.principal;
                report.net_interest += row.interest;
                report.penalties_collected += row.penalty;
                report.rows.push(row);
            }
            // agreements and unclassifiable lines move no cash
            _ => {}
        }
    }

    /// Split one cash event into principal / interest / penalty portions.
    ///
    /// Labeled sub-amounts win when present; otherwise each kind falls back to
    /// its own heuristic. The installment fallback attributes the whole
    /// received amount to principal, which overstates recovery when the line
    /// carries no interest label; the figures are as good as the lines are.
    fn split(
        &self,
        contract: &Contract,
        kind: MovementKind,
        date: NaiveDate,
        amount: Money,
        line: &str,
    ) -> ReportRow {
        let labeled_interest = self.parser.labeled_amount(line, INTEREST_LABELS);
        let labeled_penalty = self.parser.labeled_amount(line, PENALTY_LABELS);
        let penalty = labeled_penalty.unwrap_or(Money::ZERO);

        let (gross, principal, interest) = match kind {
            MovementKind::Settlement => {
                // the first amount on a settlement line is the inclusive
                // total; labeled portions win, and whichever of the two is
                // missing is derived from the remainder
                let principal = self
                    .parser
                    .labeled_amount(line, CAPITAL_LABELS)
                    .unwrap_or_else(|| match labeled_interest {
                        Some(i) => amount - i - penalty,
                        None => contract.original_principal.min(amount - penalty),
                    });
                let interest = labeled_interest.unwrap_or(amount - principal - penalty);
                (amount, principal, interest)
            }
            MovementKind::Renewal => {
                // renewals collect interest only, principal rolls over
                let interest = labeled_interest.unwrap_or(amount);
                (interest + penalty, Money::ZERO, interest)
            }
            _ => {
                // installment receipt: the penalty rides on top of the quoted
                // amount, interest only when the line labels it
                let interest = labeled_interest.unwrap_or(Money::ZERO);
                (amount + penalty, amount - interest, interest)
            }
        };

        ReportRow {
            contract_id: contract.id,
            date,
            kind,
            gross,
            principal,
            interest,
            penalty,
            line: line.to_string(),
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
