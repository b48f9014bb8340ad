//! Page templates

use minijinja::Environment;
use serde::Serialize;

use crate::error::Result;

const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Gerencial - Sistema de Gestão</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <link rel="stylesheet" href="/assets/app.css">
</head>
<body class="bg-gray-50 text-gray-800 min-h-screen">
{% block body %}{% endblock %}
</body>
</html>
"#;

const APP_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block body %}
<nav class="flex justify-between items-center p-4 bg-blue-500 text-white md:ml-64">
    <h1 class="text-lg font-bold">Gerencial</h1>
    <form method="post" action="/logout">
        <button type="submit" class="px-3 py-1 rounded hover:bg-blue-600">Sair</button>
    </form>
</nav>
<aside class="hidden md:flex h-screen w-64 bg-white flex-col p-4 fixed top-0 left-0 shadow-md">
    <div class="flex items-center justify-center my-6 pb-5">
        <h2 class="text-lg font-bold text-blue-500">Gerencial</h2>
    </div>
    <nav class="flex-1 space-y-1">
    {% for link in nav %}
        <a href="{{ link.href }}" class="flex items-center gap-3 p-2 rounded-md hover:bg-blue-100 {% if link.active %}bg-blue-100 text-blue-700 font-semibold{% else %}text-gray-700{% endif %}">{{ link.label }}</a>
    {% endfor %}
    </nav>
</aside>
<main class="p-4 md:ml-64">
    <h1 class="text-2xl font-semibold text-blue-600">{{ title }}</h1>
    {% if error %}
    <div class="mt-4 p-3 rounded bg-red-100 text-red-700">{{ error }}</div>
    {% endif %}
    {% block content %}{% endblock %}
</main>
{% endblock %}
"#;

const LOGIN_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block body %}
<div class="min-h-screen flex items-center justify-center bg-gradient-to-br from-blue-100 to-blue-300">
    <div class="w-full max-w-sm bg-white rounded-xl shadow-2xl p-8">
        <h2 class="text-2xl font-bold text-blue-600 text-center mb-10">Login</h2>
        {% if not forgot %}
        <form method="post" action="/login" class="flex flex-col gap-4" onsubmit="this.querySelector('button[type=submit]').disabled = true">
            <input name="username" value="{{ username }}" placeholder="Usuário ou E-mail" class="border border-blue-300 rounded px-4 py-2" autofocus required>
            <input name="password" type="password" placeholder="Senha" class="border border-blue-300 rounded px-4 py-2" required>
            <button type="submit" class="bg-blue-500 text-white font-semibold rounded px-4 py-2 hover:bg-blue-600 disabled:opacity-60">Entrar</button>
            {% if error %}<div class="text-red-600 text-center">{{ error }}</div>{% endif %}
            <a href="/login?forgot=true" class="text-blue-500 hover:underline text-sm text-center mt-2">Esqueceu a senha?</a>
        </form>
        {% else %}
        <form method="post" action="/login/forgot" class="flex flex-col gap-4" onsubmit="this.querySelector('button[type=submit]').disabled = true">
            <div class="text-center text-blue-700 font-semibold mb-2">Recuperar senha</div>
            <input name="email" type="email" placeholder="Digite seu e-mail" class="border border-blue-300 rounded px-4 py-2" required>
            <button type="submit" class="bg-blue-500 text-white font-semibold rounded px-4 py-2 hover:bg-blue-600 disabled:opacity-60">Enviar</button>
            {% if notice %}<div class="text-green-600 text-center">{{ notice }}</div>{% endif %}
            <a href="/login" class="text-blue-500 hover:underline text-sm text-center mt-2">Voltar ao login</a>
        </form>
        {% endif %}
    </div>
</div>
{% endblock %}
"#;

const SEARCH_MACRO: &str = r#"{% macro search(action, query, placeholder, kinds=none, kind=none) %}
<form method="get" action="{{ action }}" class="my-4 flex gap-2">
    <input name="q" value="{{ query }}" placeholder="{{ placeholder }}" class="flex-1 border border-blue-300 rounded px-4 py-2">
    {% if kinds %}
    <select name="kind" class="border border-blue-300 rounded px-2">
    {% for option in kinds %}
        <option value="{{ option }}"{% if option == kind %} selected{% endif %}>{{ option }}</option>
    {% endfor %}
    </select>
    {% endif %}
    <button type="submit" class="bg-blue-500 text-white rounded px-4 py-2">Filtrar</button>
</form>
{% endmacro %}
"#;

const CLIENTS_TEMPLATE: &str = r#"{% extends "app.html" %}
{% block content %}
{% from "search.html" import search %}
{{ search("/clients", query, "Filtrar por nome") }}
<table class="ledger w-full bg-white rounded shadow">
    <thead class="bg-blue-100"><tr><th class="p-2 text-left">Nome</th><th class="p-2 text-left">E-mail</th><th class="p-2 text-left">Telefone</th></tr></thead>
    <tbody>
    {% for row in rows %}
        <tr class="border-b"><td class="p-2">{{ row.name }}</td><td class="p-2">{{ row.email }}</td><td class="p-2">{{ row.phone }}</td></tr>
    {% else %}
        <tr><td colspan="3" class="p-4 text-center text-gray-500">Nenhum cliente encontrado.</td></tr>
    {% endfor %}
    </tbody>
</table>
{% endblock %}
"#;

const ACCOUNTS_TEMPLATE: &str = r#"{% extends "app.html" %}
{% block content %}
{% from "search.html" import search %}
{{ search(action, query, "Filtrar por cliente") }}
<table class="ledger w-full bg-white rounded shadow">
    <thead class="bg-blue-100"><tr>
        <th class="p-2 text-left">Cliente</th><th class="p-2 text-left">Valor</th><th class="p-2 text-left">Status</th>
        <th class="p-2 text-left">{{ date_label }}</th><th class="p-2 text-left">{{ settled_label }}</th><th class="p-2 text-left">Descrição</th>
    </tr></thead>
    <tbody>
    {% for row in rows %}
        <tr class="border-b">
            <td class="p-2">{{ row.client }}</td>
            <td class="p-2">{{ row.amount }}</td>
            <td class="p-2"><span class="px-2 py-1 rounded-full text-xs {{ row.status_class }}">{{ row.status }}</span></td>
            <td class="p-2">{{ row.date }}</td>
            <td class="p-2">{{ row.settled }}</td>
            <td class="p-2">{{ row.description }}</td>
        </tr>
    {% else %}
        <tr><td colspan="6" class="p-4 text-center text-gray-500">Nenhuma conta encontrada.</td></tr>
    {% endfor %}
    </tbody>
</table>
{% endblock %}
"#;

const FINANCIAL_TEMPLATE: &str = r#"{% extends "app.html" %}
{% block content %}
{% from "search.html" import search %}
{{ search("/financial", query, "Filtrar por cliente", kinds, kind) }}
<table class="ledger w-full bg-white rounded shadow">
    <thead class="bg-blue-100"><tr>
        <th class="p-2 text-left">Tipo</th><th class="p-2 text-left">Cliente</th><th class="p-2 text-left">Valor</th>
        <th class="p-2 text-left">Status</th><th class="p-2 text-left">Data</th><th class="p-2 text-left">Descrição</th>
    </tr></thead>
    <tbody>
    {% for row in rows %}
        <tr class="border-b">
            <td class="p-2">{{ row.kind }}</td>
            <td class="p-2">{{ row.client }}</td>
            <td class="p-2">{{ row.amount }}</td>
            <td class="p-2"><span class="px-2 py-1 rounded-full text-xs {{ row.status_class }}">{{ row.status }}</span></td>
            <td class="p-2">{{ row.date }}</td>
            <td class="p-2">{{ row.description }}</td>
        </tr>
    {% else %}
        <tr><td colspan="6" class="p-4 text-center text-gray-500">Nenhuma operação encontrada.</td></tr>
    {% endfor %}
    </tbody>
</table>
<div class="mt-6 flex gap-8">
    <div>Total de entradas: <span class="text-green-700 font-semibold">{{ total_entrada }}</span></div>
    <div>Total de saídas: <span class="text-red-700 font-semibold">{{ total_saida }}</span></div>
</div>
{% endblock %}
"#;

const BALANCE_TEMPLATE: &str = r#"{% extends "app.html" %}
{% block content %}
<div class="my-6 grid grid-cols-1 md:grid-cols-3 gap-4">
    <div class="bg-white rounded shadow p-4">Entradas: <span class="font-semibold text-green-700">{{ total_entrada }}</span></div>
    <div class="bg-white rounded shadow p-4">Saídas: <span class="font-semibold text-red-700">{{ total_saida }}</span></div>
    <div class="bg-white rounded shadow p-4">Saldo: {{ saldo }} <span class="ml-2 font-semibold">{{ status }}</span></div>
</div>
<table class="ledger w-full bg-white rounded shadow">
    <thead class="bg-blue-100"><tr><th class="p-2 text-left">Mês</th><th class="p-2 text-left">Entradas</th><th class="p-2 text-left">Saídas</th></tr></thead>
    <tbody>
    {% for month in months %}
        <tr class="border-b"><td class="p-2">{{ month.month }}</td><td class="p-2">{{ month.entradas }}</td><td class="p-2">{{ month.saidas }}</td></tr>
    {% else %}
        <tr><td colspan="3" class="p-4 text-center text-gray-500">Sem movimentações.</td></tr>
    {% endfor %}
    </tbody>
</table>
{% endblock %}
"#;

/// Compiled page templates
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("app.html", APP_TEMPLATE)?;
        env.add_template("search.html", SEARCH_MACRO)?;
        env.add_template("login.html", LOGIN_TEMPLATE)?;
        env.add_template("clients.html", CLIENTS_TEMPLATE)?;
        env.add_template("accounts.html", ACCOUNTS_TEMPLATE)?;
        env.add_template("financial.html", FINANCIAL_TEMPLATE)?;
        env.add_template("balance.html", BALANCE_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}
