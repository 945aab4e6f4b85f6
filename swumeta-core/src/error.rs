use thiserror::Error;

pub type WidgetResult<T> = Result<T, EWidgetError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum EWidgetError {
    #[error("Container with ID \"{0}\" not found")]
    ContainerNotFound(String),

    #[error("element has no \"{0}\" attribute")]
    MissingAttribute(String),

    #[error("{message}")]
    Fetch { status_text: String, message: String },

    #[error("payload did not match the expected schema: {0}")]
    Schema(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl EWidgetError {
    pub fn fetch(status_text: &str, message: &str) -> Self {
        Self::Fetch {
            status_text: String::from(status_text),
            message: String::from(message),
        }
    }

    // -- mirrors the textStatus values a jQuery ajax failure reports
    pub fn status_text(&self) -> &str {
        match self {
            Self::Fetch { status_text, .. } => status_text.as_str(),
            Self::Schema(_) => "parsererror",
            _ => "error",
        }
    }
}
