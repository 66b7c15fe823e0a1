use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigNotFound,
    ConfigUnsupportedFormat,
    ConfigParse,
    ConfigValidation,

    StepFailed,

    CommandFailed,
    HttpRequestFailed,
    HttpUnexpectedStatus,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigNotFound => "config.not_found",
            ErrorCode::ConfigUnsupportedFormat => "config.unsupported_format",
            ErrorCode::ConfigParse => "config.parse",
            ErrorCode::ConfigValidation => "config.validation",

            ErrorCode::StepFailed => "step.failed",

            ErrorCode::CommandFailed => "command.failed",
            ErrorCode::HttpRequestFailed => "http.request_failed",
            ErrorCode::HttpUnexpectedStatus => "http.unexpected_status",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigParseDetails {
    pub path: String,
    pub format: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValidationDetails {
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepFailedDetails {
    pub step: String,
    pub cause: String,
    pub cause_code: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }

    pub fn config_not_found(message: impl Into<String>, tried: Vec<String>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            message,
            json!({ "tried": tried }),
        )
    }

    pub fn config_unsupported_format(
        path: impl Into<String>,
        extension: impl Into<String>,
        supported: Vec<String>,
    ) -> Self {
        let extension = extension.into();
        Self::new(
            ErrorCode::ConfigUnsupportedFormat,
            format!("Unsupported config format '{}'", extension),
            json!({ "path": path.into(), "extension": extension, "supported": supported }),
        )
    }

    pub fn config_parse(
        path: impl Into<String>,
        format: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(ConfigParseDetails {
            path: path.into(),
            format: format.into(),
            error: error.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ConfigParse,
            "Failed to parse configuration",
            details,
        )
    }

    pub fn config_validation(errors: Vec<String>) -> Self {
        let details = serde_json::to_value(ConfigValidationDetails { errors })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ConfigValidation,
            "Configuration has not been properly configured",
            details,
        )
    }

    /// Wrap a collaborator failure into the one step-failure kind the
    /// workflow runner recognizes. The cause survives in the details.
    pub fn step_failed(step: impl Into<String>, cause: Error) -> Self {
        let step = step.into();
        let details = serde_json::to_value(StepFailedDetails {
            step: step.clone(),
            cause: cause.message.clone(),
            cause_code: cause.code.as_str().to_string(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        let mut error = Self::new(
            ErrorCode::StepFailed,
            format!("{} failed: {}", step, cause.message),
            details,
        );
        error.hints = cause.hints;
        error
    }

    pub fn command_failed(context: impl Into<String>, stderr: impl Into<String>) -> Self {
        let context = context.into();
        let stderr = stderr.into();
        Self::new(
            ErrorCode::CommandFailed,
            format!("{} failed: {}", context, stderr),
            json!({ "context": context, "stderr": stderr }),
        )
    }

    pub fn http_request(error: impl Into<String>) -> Self {
        let error = error.into();
        Self::new(
            ErrorCode::HttpRequestFailed,
            format!("HTTP request failed: {}", error),
            json!({ "error": error }),
        )
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::HttpUnexpectedStatus,
            format!("Unexpected HTTP status {}", status),
            json!({ "status": status, "body": body.into() }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO operation failed",
            json!({ "error": error.into(), "context": context }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON operation failed",
            json!({ "error": error.into(), "context": context }),
        )
    }

    pub fn internal_unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalUnexpected, message, Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failed_preserves_cause_in_details() {
        let cause = Error::command_failed("sign artifact", "gpg: no secret key");
        let err = Error::step_failed("sign", cause);

        assert_eq!(err.code, ErrorCode::StepFailed);
        assert!(err.message.contains("sign failed"));
        assert_eq!(err.details["step"], "sign");
        assert_eq!(err.details["causeCode"], "command.failed");
    }

    #[test]
    fn config_validation_carries_all_errors() {
        let err = Error::config_validation(vec![
            "project.name must not be blank".to_string(),
            "project.version must not be blank".to_string(),
        ]);

        assert_eq!(err.code.as_str(), "config.validation");
        assert_eq!(err.details["errors"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn with_hint_appends() {
        let err = Error::config_not_found("missing", vec![]).with_hint("pass --config-file");
        assert_eq!(err.hints.len(), 1);
        assert_eq!(err.hints[0].message, "pass --config-file");
    }
}
