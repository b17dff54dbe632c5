use tidemark_core::schema::FieldRecord;

#[derive(Debug, Clone)]
pub struct TimeOptions {
    /// Column type, e.g. `datetime`. Defaults to `timestamp`.
    pub ty: String,
}

impl Default for TimeOptions {
    fn default() -> TimeOptions {
        TimeOptions {
            ty: "timestamp".to_string(),
        }
    }
}

impl TimeOptions {
    pub(super) fn record(&self) -> FieldRecord {
        FieldRecord::new(self.ty.to_uppercase())
    }
}
