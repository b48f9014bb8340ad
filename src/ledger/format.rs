//! pt-BR display formatting

use super::models::parse_timestamp;

/// Shown in place of a date that has not happened yet
pub const PENDING_DATE: &str = "Pendente";

/// Format an amount as Brazilian reais, e.g. `R$ 1.234,56`
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, fraction)
}

/// Format a backend date as `dd/mm/yyyy`; a missing date reads "Pendente".
/// Unreadable dates are shown as sent.
pub fn format_date(value: Option<&str>) -> String {
    match value {
        None => PENDING_DATE.to_string(),
        Some(raw) if raw.trim().is_empty() => PENDING_DATE.to_string(),
        Some(raw) => parse_timestamp(raw)
            .map(|dt| dt.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

/// Badge classes for a record status
pub fn status_class(status: &str) -> &'static str {
    match status {
        "PENDENTE" => "bg-yellow-100 text-yellow-800",
        "ATRASADO" => "bg-red-100 text-red-700",
        "PAGO" | "RECEBIDO" => "bg-green-100 text-green-700",
        _ => "bg-gray-100 text-gray-700",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(5.5), "R$ 5,50");
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(-60.0), "-R$ 60,00");
        assert_eq!(format_brl(0.999), "R$ 1,00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None), "Pendente");
        assert_eq!(format_date(Some("2024-03-10T00:00:00.000Z")), "10/03/2024");
        assert_eq!(format_date(Some("2024-12-01")), "01/12/2024");
        assert_eq!(format_date(Some("ontem")), "ontem");
    }

    #[test]
    fn test_status_class() {
        assert_eq!(status_class("PAGO"), status_class("RECEBIDO"));
        assert_eq!(status_class("CANCELADO"), "bg-gray-100 text-gray-700");
    }
}
