//! Ledger aggregation tests
//! Combined operations, filters and the balance report over one data set

use gerencial::ledger::{
    filter_payables, format_brl, merge_operations, BalanceReport, BalanceStatus, Client,
    KindFilter, OperationFilter, OperationKind, Payable, Receivable, Totals, UNKNOWN_CLIENT,
};

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
        description: None,
        issued_at: issued.to_string(),
        received_at: Some(issued.to_string()),
        client_id: client_id.to_string(),
    }
}

fn fixture() -> (Vec<Client>, Vec<Payable>, Vec<Receivable>) {
    let clients = vec![client("c1", "Maria Silva"), client("c2", "João Souza")];
    let payables = vec![
        payable("p1", "c2", 60.0, "2024-02-10T00:00:00.000Z"),
        payable("p2", "c9", 15.5, "2024-03-01"),
    ];
    let receivables = vec![
        receivable("r1", "c1", 100.0, "2024-01-15T00:00:00.000Z"),
        receivable("r2", "c2", 20.0, "not a date"),
    ];
    (clients, payables, receivables)
}

#[test]
fn test_operations_newest_first() {
    let (clients, payables, receivables) = fixture();

    let operations = merge_operations(&payables, &receivables, &clients);
    let ids: Vec<&str> = operations.iter().map(|op| op.id.as_str()).collect();

    assert_eq!(ids, vec!["p2", "p1", "r1", "r2"]);
    assert_eq!(operations[0].kind, OperationKind::Saida);
    assert_eq!(operations[0].client_name, UNKNOWN_CLIENT);
    assert_eq!(operations[2].kind, OperationKind::Entrada);
}

#[test]
fn test_filter_and_totals() {
    let (clients, payables, receivables) = fixture();
    let operations = merge_operations(&payables, &receivables, &clients);

    let joao = OperationFilter {
        name: "joão".to_string(),
        kind: KindFilter::Todos,
    };
    let visible = joao.apply(&operations);
    assert_eq!(visible.len(), 2);

    let totals = Totals::of(visible.iter().copied());
    assert_eq!(totals.entrada, 20.0);
    assert_eq!(totals.saida, 60.0);

    let only_out = OperationFilter {
        name: String::new(),
        kind: KindFilter::Saida,
    };
    assert!(only_out
        .apply(&operations)
        .iter()
        .all(|op| op.kind == OperationKind::Saida));
}

#[test]
fn test_filter_payables_by_client_name() {
    let (clients, payables, _) = fixture();

    let maria = filter_payables(&payables, &clients, "maria");
    assert!(maria.is_empty());

    let joao = filter_payables(&payables, &clients, "SOUZA");
    assert_eq!(joao.len(), 1);
    assert_eq!(joao[0].id, "p1");
}

#[test]
fn test_balance_report() {
    let (_, payables, receivables) = fixture();

    let report = BalanceReport::build(&payables, &receivables);

    assert_eq!(report.total_entrada, 120.0);
    assert_eq!(report.total_saida, 75.5);
    assert_eq!(format_brl(report.saldo), "R$ 44,50");
    assert_eq!(report.status, BalanceStatus::Lucro);

    // The undated receivable counts in totals but not in any month
    let months: Vec<&str> = report.months.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
}

#[test]
fn test_balance_in_debt() {
    let payables = vec![payable("p1", "c1", 250.0, "2024-05-05")];

    let report = BalanceReport::build(&payables, &[]);

    assert_eq!(report.status, BalanceStatus::Devedor);
    assert_eq!(format_brl(report.saldo), "-R$ 250,00");
}
