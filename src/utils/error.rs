use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("No price for {category} variant '{variant}'")]
    NotFound { category: String, variant: String },

    #[error("Invalid kitchen length {length}cm: allowed {min}-{max}cm in steps of {step}cm")]
    InvalidLength {
        length: f64,
        min: f64,
        max: f64,
        step: f64,
    },

    #[error("Unknown kitchen type: {kitchen_type}")]
    UnknownType { kitchen_type: String },

    #[error("Invalid selection: {message}")]
    InvalidSelection { message: String },

    #[error("Room layout is fixed for property type {property_type}")]
    LayoutLocked { property_type: String },

    #[error("Quote has no items")]
    EmptyQuote,

    #[error("Renderer '{renderer}' unavailable: {reason}")]
    RendererUnavailable { renderer: String, reason: String },

    #[error("Document generation failed (primary: {primary}; fallback: {fallback})")]
    DocumentGenerationFailed { primary: String, fallback: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("PDF generation error: {message}")]
    PdfError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Pricing,
    Selection,
    Rendering,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } | Self::InvalidLength { .. } | Self::UnknownType { .. } => {
                ErrorCategory::Pricing
            }
            Self::InvalidSelection { .. } | Self::LayoutLocked { .. } | Self::EmptyQuote => {
                ErrorCategory::Selection
            }
            Self::RendererUnavailable { .. } | Self::DocumentGenerationFailed { .. } => {
                ErrorCategory::Rendering
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ZipError(_)
            | Self::CsvError(_)
            | Self::IoError(_)
            | Self::SerializationError(_)
            | Self::PdfError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // pricing errors only ever drop one item from the quote
            ErrorCategory::Pricing => ErrorSeverity::Low,
            ErrorCategory::Selection => ErrorSeverity::Medium,
            ErrorCategory::Rendering | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Pricing failures are skipped item-by-item and never end the session.
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Pricing
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::EmptyQuote => "Please select some items before generating a quote.".to_string(),
            Self::InvalidLength { min, max, .. } => {
                format!("Kitchen length must be between {}cm and {}cm.", min, max)
            }
            Self::LayoutLocked { property_type } => format!(
                "The number of rooms is fixed for a {} property.",
                property_type.to_uppercase()
            ),
            Self::RendererUnavailable { .. } => {
                "The quotation document could not be prepared. Trying a simplified version..."
                    .to_string()
            }
            Self::DocumentGenerationFailed { .. } => {
                "Quotation document generation failed. Please try again or contact support."
                    .to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Pricing => "Choose one of the listed sizes or kitchen types",
            ErrorCategory::Selection => match self {
                Self::EmptyQuote => "Include at least one item and choose its size",
                _ => "Check the room numbers and furniture slots in the selection file",
            },
            ErrorCategory::Rendering => "Check the output directory and retry",
            ErrorCategory::Configuration => "Fix the configuration file and run again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
