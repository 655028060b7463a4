use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unknown operation: `{0}`")]
    UnknownOperation(String),

    #[error("More argument required for `{0}`")]
    MissingArgument(String),

    #[error("`{0}` takes no argument")]
    UnexpectedArgument(String),

    #[error("Cannot parse `{0}` as operand")]
    InvalidOperand(String),

    #[error("Cannot parse `{0}` as label")]
    InvalidLabel(String),
}
