use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocalVarsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Unable to determine the local hostname")]
    HostnameUnavailable,

    #[error("Syntax error in '{path}': {message}")]
    LoadError { path: String, message: String },

    #[error("failed to combine variables, expected dicts but got a '{left}' and a '{right}'")]
    CombineError { left: String, right: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid entity: {message}")]
    EntityError { message: String },
}

impl LocalVarsError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            LocalVarsError::IoError(e) => format!("檔案存取失敗: {}", e),
            LocalVarsError::WalkError(e) => format!("無法掃描變數目錄: {}", e),
            LocalVarsError::HostnameUnavailable => "無法取得本機主機名稱".to_string(),
            LocalVarsError::LoadError { path, .. } => format!("無法解析變數檔案: {}", path),
            LocalVarsError::CombineError { .. } => "變數檔案必須是 mapping".to_string(),
            LocalVarsError::ConfigValidationError { field, .. }
            | LocalVarsError::InvalidConfigValueError { field, .. } => {
                format!("配置錯誤: {}", field)
            }
            LocalVarsError::EntityError { message } => format!("無效的 entity: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LocalVarsError::IoError(_) | LocalVarsError::WalkError(_) => {
                "Check that local_vars and its files are readable"
            }
            LocalVarsError::LoadError { .. } => "Fix the YAML/JSON syntax of the reported file",
            LocalVarsError::HostnameUnavailable => {
                "Make sure the machine has a hostname configured"
            }
            LocalVarsError::CombineError { .. } => {
                "Variable files must contain a mapping at the top level"
            }
            LocalVarsError::ConfigValidationError { .. }
            | LocalVarsError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags"
            }
            LocalVarsError::EntityError { .. } => "Pass non-empty host and group names",
        }
    }
}

pub type Result<T> = std::result::Result<T, LocalVarsError>;

/// The only error a vars plugin reports back to its caller.
///
/// Whatever went wrong underneath (hostname lookup, file access, bad syntax)
/// is carried as text only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParserError {
    pub message: String,
}

impl ParserError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<LocalVarsError> for ParserError {
    fn from(err: LocalVarsError) -> Self {
        Self::new(err.to_string())
    }
}
