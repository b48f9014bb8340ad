//! Aggregate balance report

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::models::{parse_timestamp, Payable, Receivable};

/// Whether the balance is in the black
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BalanceStatus {
    Lucro,
    Devedor,
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceStatus::Lucro => write!(f, "LUCRO"),
            BalanceStatus::Devedor => write!(f, "DEVEDOR"),
        }
    }
}

/// Money in and out for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    /// `YYYY-MM`
    pub month: String,
    pub saidas: f64,
    pub entradas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub total_entrada: f64,
    pub total_saida: f64,
    pub saldo: f64,
    pub status: BalanceStatus,
    /// Ascending by month
    pub months: Vec<MonthBucket>,
}

fn month_key(date: &str) -> Option<String> {
    parse_timestamp(date).map(|dt| format!("{}-{:02}", dt.year(), dt.month()))
}

fn bucket(buckets: &mut BTreeMap<String, MonthBucket>, month: String) -> &mut MonthBucket {
    buckets.entry(month.clone()).or_insert(MonthBucket {
        month,
        saidas: 0.0,
        entradas: 0.0,
    })
}

impl BalanceReport {
    /// Payables are bucketed by due date and receivables by issue date.
    /// Records with unreadable dates count in the totals only.
    pub fn build(payables: &[Payable], receivables: &[Receivable]) -> Self {
        let total_saida: f64 = payables.iter().map(|p| p.amount).sum();
        let total_entrada: f64 = receivables.iter().map(|r| r.amount).sum();
        let saldo = total_entrada - total_saida;
        let status = if saldo >= 0.0 {
            BalanceStatus::Lucro
        } else {
            BalanceStatus::Devedor
        };

        let mut buckets: BTreeMap<String, MonthBucket> = BTreeMap::new();
        for pay in payables {
            if let Some(month) = month_key(&pay.due_date) {
                bucket(&mut buckets, month).saidas += pay.amount;
            }
        }
        for rec in receivables {
            if let Some(month) = month_key(&rec.issued_at) {
                bucket(&mut buckets, month).entradas += rec.amount;
            }
        }

        Self {
            total_entrada,
            total_saida,
            saldo,
            status,
            months: buckets.into_values().collect(),
        }
    }
}
