use super::*;
use itertools::Itertools as _;

/// Immutable description of one server's tables and columns.
///
/// Replaced wholesale on refetch; never patched in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl SchemaSnapshot {
    pub fn new(tables: impl IntoIterator<Item = Table>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Flatten into completion candidates, table-major and column-minor in
    /// snapshot order:
    /// 1. one `Table` candidate inserting `namespace.table` (or `table`),
    /// 2. per column, a bare `column` candidate then a `table.column` one.
    ///
    /// This order is the tie-break order hosts see when they do not rank.
    pub fn candidates(&self) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(
            self.tables.iter().map(|t| 1 + 2 * t.columns.len()).sum(),
        );
        for table in &self.tables {
            let qualified = table.qualified_name();
            out.push(
                Candidate::new(&table.name, SuggestionKind::Table, qualified.clone())
                    .with_detail(match &table.schema_namespace {
                        Some(namespace) => format!("Table in {namespace}"),
                        None => "Table".to_string(),
                    })
                    .with_documentation(format!(
                        "{qualified} ({})",
                        table.columns.iter().map(|c| &c.name).join(", ")
                    )),
            );
            for column in &table.columns {
                out.push(
                    Candidate::new(&column.name, SuggestionKind::Column, &column.name)
                        .with_detail(format!("{} · {}", column.data_type, table.name)),
                );
                let dotted = format!("{}.{}", table.name, column.name);
                out.push(
                    Candidate::new(&dotted, SuggestionKind::Column, &dotted)
                        .with_detail(column.data_type.clone()),
                );
            }
        }
        out
    }
}
