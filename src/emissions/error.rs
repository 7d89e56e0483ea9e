#[derive(Debug)]
pub enum EmissionsError {
    InvalidSpeed(f64),
    InvalidAcceleration(f64),
}
