use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("missing Art-Net signature")]
    BadSignature,
}
