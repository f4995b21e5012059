use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("stale selection: expected generation {expected}, received {received}")]
    StaleSelection { expected: u64, received: u64 },
}
