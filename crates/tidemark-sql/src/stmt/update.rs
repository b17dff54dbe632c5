use super::{Filter, Name, Statement, Value};

/// `UPDATE <table> SET <column> = <value>, ... WHERE <filter>`.
#[derive(Debug, Clone)]
pub struct Update {
    pub table: Name,
    pub assignments: Vec<(Name, Value)>,
    pub filter: Filter,
}

impl Statement {
    pub fn update(
        table: &str,
        assignments: impl IntoIterator<Item = (&'static str, Value)>,
        filter: Filter,
    ) -> Self {
        Update {
            table: Name::from(table),
            assignments: assignments
                .into_iter()
                .map(|(column, value)| (Name::from(column), value))
                .collect(),
            filter,
        }
        .into()
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
