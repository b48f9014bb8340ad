//! Records served by the backend

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
}

/// An account payable (`cash-pay`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payable {
    pub id: String,
    /// PENDENTE, ATRASADO, PAGO, or whatever the backend sends
    pub status: String,
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    // The backend spells it this way
    #[serde(rename = "data_vencimeto")]
    pub due_date: String,
    #[serde(rename = "data_pagamento", default)]
    pub paid_at: Option<String>,
    #[serde(rename = "clienteId")]
    pub client_id: String,
}

/// An account receivable (`cash-receive`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receivable {
    pub id: String,
    /// PENDENTE, ATRASADO, RECEBIDO, or whatever the backend sends
    pub status: String,
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "data_emissao")]
    pub issued_at: String,
    #[serde(rename = "data_recebimento", default)]
    pub received_at: Option<String>,
    #[serde(rename = "clienteId")]
    pub client_id: String,
}

/// Direction of money in the combined ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    /// Money in (receivables)
    Entrada,
    /// Money out (payables)
    Saida,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Entrada => write!(f, "ENTRADA"),
            OperationKind::Saida => write!(f, "SAIDA"),
        }
    }
}

/// One row of the combined financial view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub id: String,
    pub kind: OperationKind,
    pub client_id: String,
    pub client_name: String,
    pub amount: f64,
    pub status: String,
    pub date: String,
    pub description: Option<String>,
}

/// Parse a backend timestamp: RFC 3339, a bare `YYYY-MM-DDTHH:MM:SS`, or a
/// plain date. RFC 3339 values are taken in UTC.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_payable_from_backend_json() {
        let json = r#"{
            "id": "p1",
            "status": "PENDENTE",
            "valor": 150.5,
            "descricao": null,
            "data_vencimeto": "2024-03-10T00:00:00.000Z",
            "data_pagamento": null,
            "clienteId": "c1",
            "createdAt": "2024-03-01T12:00:00.000Z",
            "updatedAt": "2024-03-01T12:00:00.000Z"
        }"#;
        let payable: Payable = serde_json::from_str(json).unwrap();
        assert_eq!(payable.amount, 150.5);
        assert_eq!(payable.client_id, "c1");
        assert_eq!(payable.description, None);
    }

    #[test]
    fn test_client_from_backend_json() {
        let json = r#"{"id":"c1","nome":"Ana","email":"ana@example.com","telefone":"1199999"}"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.name, "Ana");
        assert_eq!(client.phone, "1199999");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp("2024-03-10T15:30:00.000Z").unwrap();
        assert_eq!((rfc.year(), rfc.month(), rfc.day()), (2024, 3, 10));

        let naive = parse_timestamp("2024-03-10T15:30:00").unwrap();
        assert_eq!(naive.day(), 10);

        let date = parse_timestamp("2024-12-01").unwrap();
        assert_eq!(date.month(), 12);

        assert!(parse_timestamp("not a date").is_none());
    }
}
