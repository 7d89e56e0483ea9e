#[derive(Debug)]
pub enum AggregateError {
    /// No usable (finite, in-domain) values were left to fit against.
    EmptySample,
}
