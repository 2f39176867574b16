//! Human-readable rendering of parameterized statements, for logs only.

use crate::value::Value;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static NUMERIC_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\d+)").expect("placeholder pattern is valid"));

/// Substitute `$n` placeholders with the literal n-th argument.
///
/// Placeholders with no matching argument are left as written. The output
/// is never meant to be executed.
pub fn explain_sql(sql: &str, escaper: char, vars: &[Value]) -> String {
    NUMERIC_PLACEHOLDER
        .replace_all(sql, |caps: &Captures<'_>| {
            let position = caps[1].parse::<usize>().unwrap_or(0);
            match position.checked_sub(1).and_then(|idx| vars.get(idx)) {
                Some(value) => value.to_literal(escaper),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_in_position_order() {
        let sql = "INSERT INTO users (id, name, active) VALUES ($1, $2, $3)";
        let vars = vec![Value::from(7i64), Value::from("ann"), Value::from(true)];
        assert_eq!(
            explain_sql(sql, '\'', &vars),
            "INSERT INTO users (id, name, active) VALUES (7, 'ann', true)"
        );
    }

    #[test]
    fn test_out_of_range_placeholders_untouched() {
        let vars = vec![Value::from(1i64)];
        assert_eq!(explain_sql("SELECT $0, $1, $2", '\'', &vars), "SELECT $0, 1, $2");
    }

    #[test]
    fn test_double_digit_placeholders() {
        let vars: Vec<Value> = (1..=11i64).map(Value::from).collect();
        assert_eq!(explain_sql("$1 $11", '\'', &vars), "1 11");
    }
}
