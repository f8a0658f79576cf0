//! Static mapping from service error codes to user-facing messages.
//!
//! Resolution order is fixed: catalog entry, then the server-supplied
//! message, then a generic failure string.

use serde::{Deserialize, Serialize};

/// Error codes emitted by the classification service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidFile,
    InvalidText,
    AiApiError,
    NlpProcessingError,
    ClassifierError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 5] = [
        Self::InvalidFile,
        Self::InvalidText,
        Self::AiApiError,
        Self::NlpProcessingError,
        Self::ClassifierError,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "INVALID_FILE" => Some(Self::InvalidFile),
            "INVALID_TEXT" => Some(Self::InvalidText),
            "AI_API_ERROR" => Some(Self::AiApiError),
            "NLP_PROCESSING_ERROR" => Some(Self::NlpProcessingError),
            "CLASSIFIER_ERROR" => Some(Self::ClassifierError),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidFile => "INVALID_FILE",
            Self::InvalidText => "INVALID_TEXT",
            Self::AiApiError => "AI_API_ERROR",
            Self::NlpProcessingError => "NLP_PROCESSING_ERROR",
            Self::ClassifierError => "CLASSIFIER_ERROR",
        }
    }

    /// Whether the code reports a problem with the submitted content rather than the service
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidFile | Self::InvalidText)
    }
}

/// Language of the user-facing strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

struct Messages {
    invalid_file: &'static str,
    invalid_text: &'static str,
    ai_api_error: &'static str,
    nlp_processing_error: &'static str,
    classifier_error: &'static str,
    generic: &'static str,
    connectivity: &'static str,
    unexpected: &'static str,
}

static PT_BR: Messages = Messages {
    invalid_file: "Arquivo inválido. Use apenas arquivos PDF ou TXT (máximo 10MB).",
    invalid_text: "Texto inválido ou muito longo (máximo 50.000 caracteres).",
    ai_api_error: "Erro no serviço de classificação. Tente novamente em alguns instantes.",
    nlp_processing_error: "Erro ao processar o texto. Tente novamente.",
    classifier_error: "Erro interno do classificador. Tente novamente.",
    generic: "Erro ao processar solicitação.",
    connectivity: "Erro de conexão. Verifique sua internet e tente novamente.",
    unexpected: "Ocorreu um erro inesperado. Tente novamente.",
};

static EN: Messages = Messages {
    invalid_file: "Invalid file. Only PDF or TXT files are accepted (10MB maximum).",
    invalid_text: "Invalid or overly long text (50,000 characters maximum).",
    ai_api_error: "The classification service failed. Please try again shortly.",
    nlp_processing_error: "The text could not be processed. Please try again.",
    classifier_error: "Internal classifier error. Please try again.",
    generic: "The request could not be processed.",
    connectivity: "Connection error. Check your internet connection and try again.",
    unexpected: "An unexpected error occurred. Please try again.",
};

/// Message lookup for one locale
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn messages(&self) -> &'static Messages {
        match self.locale {
            Locale::PtBr => &PT_BR,
            Locale::En => &EN,
        }
    }

    /// Catalog entry for a known code
    pub fn message_for(&self, code: ErrorCode) -> &'static str {
        let messages = self.messages();
        match code {
            ErrorCode::InvalidFile => messages.invalid_file,
            ErrorCode::InvalidText => messages.invalid_text,
            ErrorCode::AiApiError => messages.ai_api_error,
            ErrorCode::NlpProcessingError => messages.nlp_processing_error,
            ErrorCode::ClassifierError => messages.classifier_error,
        }
    }

    /// Resolve a user-facing message: catalog, then server message, then generic
    pub fn resolve(&self, code: Option<&str>, server_message: Option<&str>) -> String {
        if let Some(known) = code.and_then(ErrorCode::from_code) {
            return self.message_for(known).to_string();
        }

        match server_message {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => self.generic_message().to_string(),
        }
    }

    pub fn generic_message(&self) -> &'static str {
        self.messages().generic
    }

    /// Shown when no response reached the client
    pub fn connectivity_message(&self) -> &'static str {
        self.messages().connectivity
    }

    pub fn unexpected_message(&self) -> &'static str {
        self.messages().unexpected
    }
}

/// Resolve with the default locale
pub fn resolve_error_message(code: Option<&str>, server_message: Option<&str>) -> String {
    Catalog::default().resolve(code, server_message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code_wins_over_server_message() {
        let message = resolve_error_message(Some("INVALID_FILE"), Some("Arquivo está vazio"));
        assert_eq!(message, PT_BR.invalid_file);
    }

    #[test]
    fn test_unknown_code_uses_server_message() {
        let message = resolve_error_message(Some("WIDGET_ERROR"), Some("custom text"));
        assert_eq!(message, "custom text");
    }

    #[test]
    fn test_missing_everything_uses_generic() {
        assert_eq!(resolve_error_message(None, None), PT_BR.generic);
        assert_eq!(resolve_error_message(Some("WIDGET_ERROR"), None), PT_BR.generic);
        assert_eq!(resolve_error_message(None, Some("")), PT_BR.generic);
    }

    #[test]
    fn test_absent_code_uses_server_message() {
        assert_eq!(resolve_error_message(None, Some("rate limited")), "rate limited");
    }

    #[test]
    fn test_every_code_has_distinct_entry() {
        for locale in [Locale::PtBr, Locale::En] {
            let catalog = Catalog::new(locale);
            let mut seen = std::collections::HashSet::new();
            for code in ErrorCode::ALL {
                assert_eq!(ErrorCode::from_code(code.as_str()), Some(code));
                assert!(seen.insert(catalog.message_for(code)));
            }
            assert_ne!(catalog.connectivity_message(), catalog.unexpected_message());
        }
    }

    #[test]
    fn test_english_catalog() {
        let catalog = Catalog::new(Locale::En);
        assert_eq!(
            catalog.resolve(Some("AI_API_ERROR"), None),
            "The classification service failed. Please try again shortly."
        );
        assert!(ErrorCode::InvalidText.is_validation());
        assert!(!ErrorCode::ClassifierError.is_validation());
    }
}
