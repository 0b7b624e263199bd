//! Display formatting for KPI cards.

/// Compact currency: `$485K`, `$57.2M`, `$1.5B`.
///
/// Billions and millions carry one decimal, thousands none. Amounts under a
/// thousand print as whole dollars. Non-finite input prints `$0`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();

    // (threshold, suffix, decimals), largest first
    const TIERS: [(f64, &str, usize); 3] = [(1e9, "B", 1), (1e6, "M", 1), (1e3, "K", 0)];

    for (index, (threshold, suffix, decimals)) in TIERS.into_iter().enumerate() {
        if abs < threshold {
            continue;
        }
        let scaled = abs / threshold;
        let shown = format!("{scaled:.decimals$}");
        // 999_999 rounds to "1000K"; promote to the next tier instead
        if index > 0 && shown.parse::<f64>().is_ok_and(|v| v >= 1000.0) {
            let (up_threshold, up_suffix, up_decimals) = TIERS[index - 1];
            let up = abs / up_threshold;
            return format!("{sign}${up:.up_decimals$}{up_suffix}");
        }
        return format!("{sign}${shown}{suffix}");
    }

    let whole = format!("{abs:.0}");
    if whole == "1000" {
        return format!("{sign}$1K");
    }
    if whole == "0" {
        return "$0".to_string();
    }
    format!("{sign}${whole}")
}

/// Full currency with thousands separators: `$57,235,491`.
pub fn format_currency_full(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }
    let rounded = amount.abs().round();
    let digits = format!("{rounded:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && rounded > 0.0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

/// Percentage with a fixed number of decimals: `76.7%`.
pub fn format_percent(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{value:.decimals$}%")
}
