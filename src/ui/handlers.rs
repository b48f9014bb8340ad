//! Web UI handlers
//!
//! Every page runs the render guard before touching the backend, then
//! records itself as the last visited route.

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use serde::{Deserialize, Serialize};

use crate::api::SharedState;
use crate::auth::{AuthError, Credentials, ForgotPasswordRequest, FORGOT_PASSWORD_ACK};
use crate::error::Result;
use crate::ledger::{
    filter_clients, filter_payables, filter_receivables, format_brl, format_date,
    merge_operations, status_class, BalanceReport, Client, KindFilter, OperationFilter, Totals,
};
use crate::session::{CookieSessionStore, Decision, SessionGate};

/// Sidebar entries
const NAV_LINKS: &[(&str, &str)] = &[
    ("/clients", "Clientes"),
    ("/payaccounts", "Contas a pagar"),
    ("/receiveaccounts", "Contas a receber"),
    ("/financial", "Financeiro"),
    ("/balance", "Balanço Geral"),
];

const BACKEND_UNAVAILABLE: &str = "Não foi possível carregar os dados do servidor.";

#[derive(Debug, Serialize)]
struct NavLink {
    href: &'static str,
    label: &'static str,
    active: bool,
}

fn nav(path: &str) -> Vec<NavLink> {
    NAV_LINKS
        .iter()
        .map(|&(href, label)| NavLink {
            href,
            label,
            active: href == path,
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub forgot: bool,
}

#[derive(Debug, Serialize)]
struct ClientRow<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
}

#[derive(Debug, Serialize)]
struct AccountRow {
    client: String,
    amount: String,
    status: String,
    status_class: &'static str,
    date: String,
    settled: String,
    description: String,
}

#[derive(Debug, Serialize)]
struct OperationRow {
    kind: String,
    client: String,
    amount: String,
    status: String,
    status_class: &'static str,
    date: String,
    description: String,
}

#[derive(Debug, Serialize)]
struct MonthRow {
    month: String,
    entradas: String,
    saidas: String,
}

/// Apply the render guard; `Some` is the redirect to send instead of the page
fn render_guard(
    state: &SharedState,
    gate: &SessionGate<CookieSessionStore>,
    path: &str,
) -> Option<Response> {
    match gate.guard(&state.render_policy, path) {
        Decision::Allow => None,
        Decision::RedirectTo(target) => Some(Redirect::to(&target).into_response()),
    }
}

/// Send the page along with any cookie changes the gate made
fn page(gate: SessionGate<CookieSessionStore>, html: String) -> Response {
    (gate.into_store().into_jar(), Html(html)).into_response()
}

fn client_name(clients: &[Client], id: &str) -> String {
    clients
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| crate::ledger::UNKNOWN_CLIENT.to_string())
}

fn backend_error(e: &crate::error::Error) -> Option<&'static str> {
    tracing::warn!("Backend request failed: {}", e);
    Some(BACKEND_UNAVAILABLE)
}

/// `/`: continue where the user left off
pub async fn home(State(state): State<SharedState>, jar: CookieJar) -> Response {
    let gate = state.gate(jar);
    Redirect::to(&gate.restore_route()).into_response()
}

/// Login form. The render guard always shows it, even to a logged-in user.
pub async fn login_page(
    State(state): State<SharedState>,
    jar: CookieJar,
    uri: Uri,
    Query(query): Query<LoginQuery>,
) -> Result<Response> {
    let gate = state.gate(jar);
    if let Some(redirect) = render_guard(&state, &gate, uri.path()) {
        return Ok(redirect);
    }

    let html = state
        .templates
        .render("login.html", context! { forgot => query.forgot })?;
    Ok(page(gate, html))
}

pub async fn login_submit(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(credentials): Form<Credentials>,
) -> Result<Response> {
    let gate = state.gate(jar);

    let error = match gate.login(&credentials).await {
        Ok(_) => {
            return Ok((gate.into_store().into_jar(), Redirect::to("/")).into_response());
        }
        Err(e) => e,
    };
    let status = match error {
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::ConnectionError => StatusCode::BAD_GATEWAY,
    };

    let html = state.templates.render(
        "login.html",
        context! {
            forgot => false,
            username => credentials.identifier,
            error => error.to_string(),
        },
    )?;
    Ok((status, page(gate, html)).into_response())
}

/// A reload of the recovery page lands back on the recovery form
pub async fn forgot_page(State(state): State<SharedState>) -> Response {
    Redirect::to(&format!("{}?forgot=true", state.config.auth.login_path)).into_response()
}

/// Password recovery. The answer never reveals whether the address exists.
pub async fn forgot_password(
    State(state): State<SharedState>,
    Form(request): Form<ForgotPasswordRequest>,
) -> Result<Response> {
    tracing::debug!("Password recovery requested ({} chars)", request.email.len());

    let html = state.templates.render(
        "login.html",
        context! { forgot => true, notice => FORGOT_PASSWORD_ACK },
    )?;
    Ok(Html(html).into_response())
}

pub async fn logout(State(state): State<SharedState>, jar: CookieJar) -> Response {
    let gate = state.gate(jar);
    let navigation = gate.logout();
    (gate.into_store().into_jar(), Redirect::to(&navigation.to)).into_response()
}

pub async fn clients(
    State(state): State<SharedState>,
    jar: CookieJar,
    uri: Uri,
    Query(query): Query<NameQuery>,
) -> Result<Response> {
    let gate = state.gate(jar);
    if let Some(redirect) = render_guard(&state, &gate, uri.path()) {
        return Ok(redirect);
    }
    gate.remember_route(uri.path());

    let (clients, error) = match state.backend.list_clients().await {
        Ok(clients) => (clients, None),
        Err(e) => (Vec::new(), backend_error(&e)),
    };

    let rows: Vec<ClientRow> = filter_clients(&clients, &query.q)
        .into_iter()
        .map(|c| ClientRow {
            name: &c.name,
            email: &c.email,
            phone: &c.phone,
        })
        .collect();

    let html = state.templates.render(
        "clients.html",
        context! {
            title => "Clientes",
            nav => nav(uri.path()),
            query => query.q,
            rows => rows,
            error => error,
        },
    )?;
    Ok(page(gate, html))
}

pub async fn payables(
    State(state): State<SharedState>,
    jar: CookieJar,
    uri: Uri,
    Query(query): Query<NameQuery>,
) -> Result<Response> {
    let gate = state.gate(jar);
    if let Some(redirect) = render_guard(&state, &gate, uri.path()) {
        return Ok(redirect);
    }
    gate.remember_route(uri.path());

    let fetched = tokio::try_join!(state.backend.list_payables(), state.backend.list_clients());
    let ((payables, clients), error) = match fetched {
        Ok(data) => (data, None),
        Err(e) => ((Vec::new(), Vec::new()), backend_error(&e)),
    };

    let rows: Vec<AccountRow> = filter_payables(&payables, &clients, &query.q)
        .into_iter()
        .map(|p| AccountRow {
            client: client_name(&clients, &p.client_id),
            amount: format_brl(p.amount),
            status: p.status.clone(),
            status_class: status_class(&p.status),
            date: format_date(Some(&p.due_date)),
            settled: format_date(p.paid_at.as_deref()),
            description: p.description.clone().unwrap_or_default(),
        })
        .collect();

    let html = state.templates.render(
        "accounts.html",
        context! {
            title => "Contas a pagar",
            nav => nav(uri.path()),
            action => uri.path(),
            query => query.q,
            date_label => "Vencimento",
            settled_label => "Pagamento",
            rows => rows,
            error => error,
        },
    )?;
    Ok(page(gate, html))
}

pub async fn receivables(
    State(state): State<SharedState>,
    jar: CookieJar,
    uri: Uri,
    Query(query): Query<NameQuery>,
) -> Result<Response> {
    let gate = state.gate(jar);
    if let Some(redirect) = render_guard(&state, &gate, uri.path()) {
        return Ok(redirect);
    }
    gate.remember_route(uri.path());

    let fetched = tokio::try_join!(
        state.backend.list_receivables(),
        state.backend.list_clients()
    );
    let ((receivables, clients), error) = match fetched {
        Ok(data) => (data, None),
        Err(e) => ((Vec::new(), Vec::new()), backend_error(&e)),
    };

    let rows: Vec<AccountRow> = filter_receivables(&receivables, &clients, &query.q)
        .into_iter()
        .map(|r| AccountRow {
            client: client_name(&clients, &r.client_id),
            amount: format_brl(r.amount),
            status: r.status.clone(),
            status_class: status_class(&r.status),
            date: format_date(Some(&r.issued_at)),
            settled: format_date(r.received_at.as_deref()),
            description: r.description.clone().unwrap_or_default(),
        })
        .collect();

    let html = state.templates.render(
        "accounts.html",
        context! {
            title => "Contas a receber",
            nav => nav(uri.path()),
            action => uri.path(),
            query => query.q,
            date_label => "Emissão",
            settled_label => "Recebimento",
            rows => rows,
            error => error,
        },
    )?;
    Ok(page(gate, html))
}

pub async fn financial(
    State(state): State<SharedState>,
    jar: CookieJar,
    uri: Uri,
    Query(filter): Query<OperationFilter>,
) -> Result<Response> {
    let gate = state.gate(jar);
    if let Some(redirect) = render_guard(&state, &gate, uri.path()) {
        return Ok(redirect);
    }
    gate.remember_route(uri.path());

    let (snapshot, error) = match state.backend.fetch_ledger().await {
        Ok(snapshot) => (snapshot, None),
        Err(e) => (Default::default(), backend_error(&e)),
    };

    let operations = merge_operations(&snapshot.payables, &snapshot.receivables, &snapshot.clients);
    let visible = filter.apply(&operations);
    let totals = Totals::of(visible.iter().copied());

    let rows: Vec<OperationRow> = visible
        .iter()
        .map(|op| OperationRow {
            kind: op.kind.to_string(),
            client: op.client_name.clone(),
            amount: format_brl(op.amount),
            status: op.status.clone(),
            status_class: status_class(&op.status),
            date: format_date(Some(&op.date)),
            description: op.description.clone().unwrap_or_default(),
        })
        .collect();

    let kinds = [KindFilter::Todos, KindFilter::Entrada, KindFilter::Saida]
        .iter()
        .map(|k| kind_label(*k))
        .collect::<Vec<_>>();

    let html = state.templates.render(
        "financial.html",
        context! {
            title => "Financeiro",
            nav => nav(uri.path()),
            query => filter.name,
            kinds => kinds,
            kind => kind_label(filter.kind),
            rows => rows,
            total_entrada => format_brl(totals.entrada),
            total_saida => format_brl(totals.saida),
            error => error,
        },
    )?;
    Ok(page(gate, html))
}

fn kind_label(kind: KindFilter) -> &'static str {
    match kind {
        KindFilter::Todos => "TODOS",
        KindFilter::Entrada => "ENTRADA",
        KindFilter::Saida => "SAIDA",
    }
}

pub async fn balance(
    State(state): State<SharedState>,
    jar: CookieJar,
    uri: Uri,
) -> Result<Response> {
    let gate = state.gate(jar);
    if let Some(redirect) = render_guard(&state, &gate, uri.path()) {
        return Ok(redirect);
    }
    gate.remember_route(uri.path());

    let fetched = tokio::try_join!(
        state.backend.list_payables(),
        state.backend.list_receivables()
    );
    let ((payables, receivables), error) = match fetched {
        Ok(data) => (data, None),
        Err(e) => ((Vec::new(), Vec::new()), backend_error(&e)),
    };

    let report = BalanceReport::build(&payables, &receivables);
    let months: Vec<MonthRow> = report
        .months
        .iter()
        .map(|m| MonthRow {
            month: m.month.clone(),
            entradas: format_brl(m.entradas),
            saidas: format_brl(m.saidas),
        })
        .collect();

    let html = state.templates.render(
        "balance.html",
        context! {
            title => "Balanço Geral",
            nav => nav(uri.path()),
            total_entrada => format_brl(report.total_entrada),
            total_saida => format_brl(report.total_saida),
            saldo => format_brl(report.saldo),
            status => report.status.to_string(),
            months => months,
            error => error,
        },
    )?;
    Ok(page(gate, html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_marks_active_link() {
        let links = nav("/financial");
        assert_eq!(links.len(), 5);
        assert!(links.iter().filter(|l| l.active).all(|l| l.href == "/financial"));
        assert_eq!(links.iter().filter(|l| l.active).count(), 1);
    }

    #[test]
    fn test_client_name_fallback() {
        assert_eq!(client_name(&[], "x"), crate::ledger::UNKNOWN_CLIENT);
    }
}
