use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Document is empty")]
    EmptyDocument,

    #[error("Required field '{0}' is missing or not numeric")]
    MissingField(&'static str),
}
