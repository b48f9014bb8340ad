//! Combined ledger view and client-name filters

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::models::{parse_timestamp, Client, Operation, OperationKind, Payable, Receivable};

/// Name shown for records whose client is not in the registry
pub const UNKNOWN_CLIENT: &str = "Desconhecido";

/// Which operations the financial view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KindFilter {
    #[default]
    Todos,
    Entrada,
    Saida,
}

impl KindFilter {
    pub fn matches(&self, kind: OperationKind) -> bool {
        match self {
            KindFilter::Todos => true,
            KindFilter::Entrada => kind == OperationKind::Entrada,
            KindFilter::Saida => kind == OperationKind::Saida,
        }
    }
}

/// Client-name and kind filter over operations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationFilter {
    #[serde(default, rename = "q")]
    pub name: String,
    #[serde(default)]
    pub kind: KindFilter,
}

impl OperationFilter {
    pub fn apply<'a>(&self, operations: &'a [Operation]) -> Vec<&'a Operation> {
        let needle = self.name.to_lowercase();
        operations
            .iter()
            .filter(|op| op.client_name.to_lowercase().contains(&needle))
            .filter(|op| self.kind.matches(op.kind))
            .collect()
    }
}

/// Money in and out over a set of operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub entrada: f64,
    pub saida: f64,
}

impl Totals {
    pub fn of<'a>(operations: impl IntoIterator<Item = &'a Operation>) -> Self {
        operations
            .into_iter()
            .fold(Totals::default(), |mut totals, op| {
                match op.kind {
                    OperationKind::Entrada => totals.entrada += op.amount,
                    OperationKind::Saida => totals.saida += op.amount,
                }
                totals
            })
    }
}

fn name_index(clients: &[Client]) -> HashMap<&str, &str> {
    clients
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect()
}

/// Resolve a client id to a display name
pub fn client_name<'a>(clients: &HashMap<&str, &'a str>, id: &str) -> &'a str {
    clients.get(id).copied().unwrap_or(UNKNOWN_CLIENT)
}

/// Merge payables (out, dated by due date) and receivables (in, dated by
/// issue date) into one list, newest first
pub fn merge_operations(
    payables: &[Payable],
    receivables: &[Receivable],
    clients: &[Client],
) -> Vec<Operation> {
    let names = name_index(clients);

    let outgoing = payables.iter().map(|pay| Operation {
        id: pay.id.clone(),
        kind: OperationKind::Saida,
        client_id: pay.client_id.clone(),
        client_name: client_name(&names, &pay.client_id).to_string(),
        amount: pay.amount,
        status: pay.status.clone(),
        date: pay.due_date.clone(),
        description: pay.description.clone(),
    });
    let incoming = receivables.iter().map(|rec| Operation {
        id: rec.id.clone(),
        kind: OperationKind::Entrada,
        client_id: rec.client_id.clone(),
        client_name: client_name(&names, &rec.client_id).to_string(),
        amount: rec.amount,
        status: rec.status.clone(),
        date: rec.issued_at.clone(),
        description: rec.description.clone(),
    });

    let mut operations: Vec<Operation> = outgoing.chain(incoming).collect();
    // Unparseable dates sort last
    operations.sort_by_cached_key(|op| std::cmp::Reverse(parse_timestamp(&op.date)));
    operations
}

/// Clients whose name contains `name`, ignoring case
pub fn filter_clients<'a>(clients: &'a [Client], name: &str) -> Vec<&'a Client> {
    let needle = name.to_lowercase();
    clients
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}

/// Payables whose client name contains `name`, ignoring case
pub fn filter_payables<'a>(
    payables: &'a [Payable],
    clients: &[Client],
    name: &str,
) -> Vec<&'a Payable> {
    let names = name_index(clients);
    let needle = name.to_lowercase();
    payables
        .iter()
        .filter(|p| {
            client_name(&names, &p.client_id)
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

/// Receivables whose client name contains `name`, ignoring case
pub fn filter_receivables<'a>(
    receivables: &'a [Receivable],
    clients: &[Client],
    name: &str,
) -> Vec<&'a Receivable> {
    let names = name_index(clients);
    let needle = name.to_lowercase();
    receivables
        .iter()
        .filter(|r| {
            client_name(&names, &r.client_id)
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: &str, name: &str) -> Client {
        Client {
            id: id.to_string(),
            name: name.to_string(),
            email: String::new(),
            phone: String::new(),
        }
    }

    fn payable(id: &str, client_id: &str, amount: f64, due: &str) -> Payable {
        Payable {
            id: id.to_string(),
            status: "PENDENTE".to_string(),
            amount,
            description: None,
            due_date: due.to_string(),
            paid_at: None,
            client_id: client_id.to_string(),
        }
    }

    fn receivable(id: &str, client_id: &str, amount: f64, issued: &str) -> Receivable {
        Receivable {
            id: id.to_string(),
            status: "RECEBIDO".to_string(),
            amount,
            description: Some("serviço".to_string()),
            issued_at: issued.to_string(),
            received_at: None,
            client_id: client_id.to_string(),
        }
    }

    #[test]
    fn test_merge_sorts_newest_first() {
        let clients = vec![client("c1", "Ana")];
        let ops = merge_operations(
            &[payable("p1", "c1", 10.0, "2024-01-05")],
            &[receivable("r1", "c1", 20.0, "2024-02-01")],
            &clients,
        );
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].id, "r1");
        assert_eq!(ops[0].kind, OperationKind::Entrada);
        assert_eq!(ops[1].kind, OperationKind::Saida);
    }

    #[test]
    fn test_merge_unknown_client() {
        let ops = merge_operations(&[payable("p1", "ghost", 10.0, "2024-01-05")], &[], &[]);
        assert_eq!(ops[0].client_name, UNKNOWN_CLIENT);
    }

    #[test]
    fn test_merge_unparseable_dates_last() {
        let ops = merge_operations(
            &[
                payable("bad", "c1", 1.0, "someday"),
                payable("good", "c1", 1.0, "2020-01-01"),
            ],
            &[],
            &[],
        );
        assert_eq!(ops[0].id, "good");
        assert_eq!(ops[1].id, "bad");
    }

    #[test]
    fn test_operation_filter_by_name_and_kind() {
        let clients = vec![client("c1", "Ana Souza"), client("c2", "Bruno")];
        let ops = merge_operations(
            &[payable("p1", "c1", 10.0, "2024-01-05"), payable("p2", "c2", 5.0, "2024-01-06")],
            &[receivable("r1", "c1", 20.0, "2024-02-01")],
            &clients,
        );

        let filter = OperationFilter {
            name: "ana".to_string(),
            kind: KindFilter::Todos,
        };
        assert_eq!(filter.apply(&ops).len(), 2);

        let filter = OperationFilter {
            name: "ANA".to_string(),
            kind: KindFilter::Saida,
        };
        let filtered = filter.apply(&ops);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "p1");
    }

    #[test]
    fn test_totals() {
        let ops = merge_operations(
            &[payable("p1", "c1", 10.0, "2024-01-05"), payable("p2", "c1", 5.5, "2024-01-06")],
            &[receivable("r1", "c1", 20.0, "2024-02-01")],
            &[],
        );
        let totals = Totals::of(&ops);
        assert_eq!(totals.saida, 15.5);
        assert_eq!(totals.entrada, 20.0);
    }

    #[test]
    fn test_filter_records_by_client_name() {
        let clients = vec![client("c1", "Ana"), client("c2", "Bruno")];
        let payables = vec![payable("p1", "c1", 1.0, "2024-01-01"), payable("p2", "c2", 1.0, "2024-01-01")];
        let receivables = vec![receivable("r1", "c2", 1.0, "2024-01-01")];

        assert_eq!(filter_clients(&clients, "br").len(), 1);
        assert_eq!(filter_payables(&payables, &clients, "ana")[0].id, "p1");
        assert_eq!(filter_receivables(&receivables, &clients, "bruno").len(), 1);
        assert_eq!(filter_receivables(&receivables, &clients, "ana").len(), 0);
        assert_eq!(filter_payables(&payables, &clients, "").len(), 2);
    }

    #[test]
    fn test_kind_filter_deserializes_uppercase() {
        let kind: KindFilter = serde_json::from_str("\"SAIDA\"").unwrap();
        assert_eq!(kind, KindFilter::Saida);
    }
}
