use super::*;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(rename = "schema", default, skip_serializing_if = "Option::is_none")]
    pub schema_namespace: Option<String>,
    // Order as delivered by the schema service; it drives candidate order.
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Construct a table with an explicit ordered list of (name, data type) pairs.
    pub fn new_with_ordered(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            name: name.into(),
            schema_namespace: None,
            columns: columns
                .into_iter()
                .map(|(name, data_type)| Column::new(name, data_type))
                .collect(),
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.schema_namespace = Some(namespace.into());
        self
    }

    /// `namespace.table` when the table has a namespace, else the bare name.
    pub fn qualified_name(&self) -> String {
        match &self.schema_namespace {
            Some(namespace) => format!("{namespace}.{}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_uses_namespace_when_present() {
        assert_eq!(Table::new("users").qualified_name(), "users");
        assert_eq!(
            Table::new("users").in_namespace("dbo").qualified_name(),
            "dbo.users"
        );
    }

    #[test]
    fn ordered_columns_keep_their_order() {
        let table = Table::new_with_ordered("t", [("b", "int"), ("a", "text")]);
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(table.column("a").map(|c| c.data_type.as_str()), Some("text"));
    }

    #[test]
    fn deserializes_service_payload() {
        let table: Table = serde_json::from_str(
            r#"{"name":"orders","schema":"sales","columns":[{"name":"id","data_type":"int"}]}"#,
        )
        .expect("valid table");
        assert_eq!(table.schema_namespace.as_deref(), Some("sales"));
        assert_eq!(table.columns, vec![Column::new("id", "int")]);
    }
}
