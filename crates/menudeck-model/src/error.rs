/// Unknown textual value for one of the model enums
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    /// Enum being parsed
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
}

impl ParseEnumError {
    #[inline]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
