use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value} (year {year})")]
    NonFinite {
        what: String,
        year: i32,
        value: f64,
    },
}
