//! Clients, payables and receivables, and the views built over them

mod balance;
pub mod format;
mod models;
mod operations;

pub use balance::{BalanceReport, BalanceStatus, MonthBucket};
pub use format::{format_brl, format_date, status_class};
pub use models::{parse_timestamp, Client, Operation, OperationKind, Payable, Receivable};
pub use operations::{
    filter_clients, filter_payables, filter_receivables, merge_operations, KindFilter,
    OperationFilter, Totals, UNKNOWN_CLIENT,
};
