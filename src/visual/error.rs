#[derive(Debug)]
pub enum VisualError {
    /// Nothing to render: the per-edge aggregate was empty.
    EmptyAggregate,
    Json(serde_json::Error),
}

impl From<serde_json::Error> for VisualError {
    fn from(value: serde_json::Error) -> Self {
        VisualError::Json(value)
    }
}
