use console::style;
use esdc_core::EsdcError;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check the file passed with --config for typos and unknown keys")
        .with_suggestion("Check the ESDC_* environment variables")
        .with_help("Run: esdc config")
}

/// Create error for a malformed ISO ladder
pub fn ladder_unavailable(reason: &str) -> CliError {
    CliError::new("Cannot build the ISO-8601 pattern ladder")
        .with_context(format!("Error: {}", reason))
        .with_suggestion("Select the other ladder with --iso-ladder")
        .with_help("Run: esdc datetime --help")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let error = match error.downcast::<CliError>() {
        Ok(cli_error) => return cli_error,
        Err(error) => error,
    };

    if let Some(EsdcError::ConfigInvalid { key, reason }) = error.downcast_ref::<EsdcError>() {
        return invalid_config(key, reason);
    }

    let message = error.to_string();
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("ermission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
    } else {
        CliError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_anyhow_keeps_cli_error() {
        let err = anyhow::Error::new(ladder_unavailable("bad level"));
        let cli_error = from_anyhow(err);
        assert_eq!(cli_error.message, "Cannot build the ISO-8601 pattern ladder");
        assert!(cli_error.help_command.is_some());
    }

    #[test]
    fn test_from_anyhow_maps_config_errors() {
        let err = anyhow::Error::new(EsdcError::ConfigInvalid {
            key: "iso_ladder".to_string(),
            reason: "unknown ladder".to_string(),
        });
        let cli_error = from_anyhow(err);
        assert_eq!(cli_error.message, "Invalid configuration: iso_ladder");
        assert_eq!(cli_error.suggestions.len(), 2);
    }

    #[test]
    fn test_from_anyhow_plain_message() {
        let cli_error = from_anyhow(anyhow::anyhow!("something else"));
        assert_eq!(cli_error.message, "something else");
        assert!(cli_error.context.is_none());
    }
}
