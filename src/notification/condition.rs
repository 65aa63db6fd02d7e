//! Renders quality gate conditions as markdown lines.

use tracing::warn;

use crate::analysis::{Condition, EvaluationStatus};

/// Metrics whose raw value is a ratio and renders with a `%` suffix.
const PERCENTAGE_METRICS: [&str; 2] = ["new_coverage", "new_sqale_debt_ratio"];

/// Renders one condition as a markdown list entry, in the shape
/// `* **metric**: STATUS` with an indented detail line carrying the value
/// and thresholds. `NO_VALUE` conditions have no measurement, so only the
/// status is shown.
pub fn translate_condition(condition: &Condition) -> String {
    if condition.status == EvaluationStatus::NoValue {
        return format!(
            "* **{}**: {}\n",
            condition.metric_key,
            condition.status.as_str()
        );
    }

    let mut detail = render_value(condition);
    if let Some(threshold) = &condition.warning_threshold {
        detail.push_str(", warning if ");
        if let Some(operator) = condition.operator {
            detail.push_str(operator.symbol());
        }
        detail.push_str(threshold);
    }
    if let Some(threshold) = &condition.error_threshold {
        detail.push_str(", error if ");
        if let Some(operator) = condition.operator {
            detail.push_str(operator.symbol());
        }
        detail.push_str(threshold);
    }

    format!(
        "* **{}**: {}\n  * {}\n",
        condition.metric_key,
        condition.status.as_str(),
        detail
    )
}

/// Conditions to render when fail-only delivery is requested: everything
/// that did not evaluate OK, `NO_VALUE` included. Re-filtering an already
/// filtered set yields the same set.
pub fn filter_fail_only(conditions: &[Condition]) -> Vec<Condition> {
    conditions
        .iter()
        .filter(|condition| condition.status != EvaluationStatus::Ok)
        .cloned()
        .collect()
}

/// Measured value with percentage formatting for the designated metrics.
/// An empty value renders as a placeholder dash.
fn render_value(condition: &Condition) -> String {
    if condition.value.is_empty() {
        return "-".to_string();
    }
    if !is_percentage_metric(&condition.metric_key) {
        return condition.value.clone();
    }

    match condition.value.parse::<f64>() {
        Ok(number) => format!("{}%", format_percentage(number)),
        Err(error) => {
            warn!(
                metric = %condition.metric_key,
                value = %condition.value,
                error = %error,
                "failed to parse percentage value, rendering raw"
            );
            condition.value.clone()
        }
    }
}

fn is_percentage_metric(metric_key: &str) -> bool {
    PERCENTAGE_METRICS.contains(&metric_key)
}

/// At most two fractional digits, trailing zeros trimmed.
fn format_percentage(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
