use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("budget must be non-negative, got {0}")]
    NegativeBudget(f64),
}
