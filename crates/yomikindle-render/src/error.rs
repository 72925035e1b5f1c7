#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Failed to write markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rendered markup is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
