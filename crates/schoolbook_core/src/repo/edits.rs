//! Typed partial-update builder.
//!
//! # Responsibility
//! - Collect "field -> new value" edits in caller order.
//! - Render exactly one parameterized UPDATE touching only the present
//!   fields, plus a key-equality predicate.
//!
//! # Invariants
//! - An omitted field is never part of the statement; nothing is nulled out
//!   implicitly.
//! - Callers short-circuit on an empty edit set; `render_update` is only
//!   defined for non-empty sets.
//! - A present value identical to the stored one is still written. The
//!   builder never reads current state.

use rusqlite::types::Value;

/// Ordered set of column edits destined for a single UPDATE statement.
#[derive(Debug, Clone, Default)]
pub struct FieldEdits {
    columns: Vec<(&'static str, Value)>,
}

impl FieldEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text column edit.
    pub fn set_text(&mut self, column: &'static str, value: &str) {
        self.columns.push((column, Value::Text(value.to_string())));
    }

    /// Appends a real-valued column edit.
    pub fn set_real(&mut self, column: &'static str, value: f64) {
        self.columns.push((column, Value::Real(value)));
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Renders `UPDATE <table> SET c1 = ?1, ... WHERE <key_column> = ?n`
    /// with bind values in edit order followed by the key.
    pub fn render_update(
        self,
        table: &'static str,
        key_column: &'static str,
        key: &str,
    ) -> (String, Vec<Value>) {
        debug_assert!(!self.is_empty(), "update rendered with zero fields");

        let mut sql = format!("UPDATE {table} SET ");
        let mut bind_values = Vec::with_capacity(self.columns.len() + 1);

        for (index, (column, value)) in self.columns.into_iter().enumerate() {
            if index > 0 {
                sql.push_str(", ");
            }
            sql.push_str(column);
            sql.push_str(&format!(" = ?{}", index + 1));
            bind_values.push(value);
        }

        sql.push_str(&format!(
            " WHERE {key_column} = ?{};",
            bind_values.len() + 1
        ));
        bind_values.push(Value::Text(key.to_string()));

        (sql, bind_values)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldEdits;
    use rusqlite::types::Value;

    #[test]
    fn renders_single_field_update() {
        let mut edits = FieldEdits::new();
        edits.set_text("email", "a@x.com");

        let (sql, values) = edits.render_update("students", "id", "S001");
        assert_eq!(sql, "UPDATE students SET email = ?1 WHERE id = ?2;");
        assert_eq!(
            values,
            vec![
                Value::Text("a@x.com".to_string()),
                Value::Text("S001".to_string()),
            ]
        );
    }

    #[test]
    fn preserves_edit_order_and_parameter_indexes() {
        let mut edits = FieldEdits::new();
        edits.set_text("name", "Jane Doe");
        edits.set_text("department", "English");
        edits.set_real("salary", 48000.0);

        let (sql, values) = edits.render_update("teachers", "id", "T002");
        assert_eq!(
            sql,
            "UPDATE teachers SET name = ?1, department = ?2, salary = ?3 WHERE id = ?4;"
        );
        assert_eq!(values.len(), 4);
        assert_eq!(values[2], Value::Real(48000.0));
        assert_eq!(values[3], Value::Text("T002".to_string()));
    }

    #[test]
    fn empty_set_reports_empty() {
        let edits = FieldEdits::new();
        assert!(edits.is_empty());
        assert_eq!(edits.len(), 0);
    }
}
