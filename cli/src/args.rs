use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nutrilens_core::domain::common::{
    DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL, DEFAULT_STORAGE_QUOTA_BYTES, LLMConfig,
    NutrilensConfig, StorageConfig,
};

/// Key baked in at build time, if any.
const BUILD_TIME_API_KEY: Option<&str> = option_env!("NUTRILENS_GEMINI_API_KEY");

#[derive(Debug, Clone, Parser)]
#[command(name = "nutrilens", version, about = "Estimate the nutrition of a meal from a photo")]
pub struct Args {
    /// Directory holding the local storage file
    #[arg(long, env = "NUTRILENS_DATA_DIR", default_value = ".nutrilens", global = true)]
    pub data_dir: PathBuf,

    /// Gemini API key. When set, the stored key is ignored and cannot be edited
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL, global = true)]
    pub model: String,

    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_GEMINI_API_BASE, global = true)]
    pub api_base: String,

    /// Size limit of the storage file in bytes, 0 for unlimited
    #[arg(
        long,
        env = "NUTRILENS_STORAGE_QUOTA_BYTES",
        default_value_t = DEFAULT_STORAGE_QUOTA_BYTES,
        global = true
    )]
    pub storage_quota_bytes: u64,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Analyze a food photo and record the result
    Analyze {
        /// JPG, PNG, WebP or HEIC image, at most 10 MB
        image: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Browse past analyses
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },

    /// Manage the Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyCommand,
    },

    /// Show or change the colour theme
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum HistoryCommand {
    List {
        #[arg(long)]
        json: bool,
    },
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },
    Remove {
        id: String,
    },
    Clear,
}

#[derive(Debug, Clone, Subcommand)]
pub enum KeyCommand {
    Status,
    Set { key: String },
    Clear,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ThemeCommand {
    Show,
    Set { name: String },
    List,
}

impl From<Args> for NutrilensConfig {
    fn from(args: Args) -> Self {
        let injected_api_key = args
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| BUILD_TIME_API_KEY.map(str::to_string));

        NutrilensConfig {
            llm: LLMConfig {
                injected_api_key,
                gemini_model: args.model,
                api_base: args.api_base,
            },
            storage: StorageConfig {
                data_dir: args.data_dir,
                quota_bytes: (args.storage_quota_bytes > 0).then_some(args.storage_quota_bytes),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_with_global_flags() {
        let args = Args::try_parse_from([
            "nutrilens",
            "--data-dir",
            "/tmp/nl",
            "analyze",
            "lunch.jpg",
            "--json",
            "--model",
            "gemini-test",
        ])
        .unwrap();

        assert_eq!(args.data_dir, PathBuf::from("/tmp/nl"));
        assert_eq!(args.model, "gemini-test");
        assert!(matches!(
            args.command,
            Command::Analyze { ref image, json: true } if image == &PathBuf::from("lunch.jpg")
        ));
    }

    #[test]
    fn parses_nested_subcommands() {
        let args = Args::try_parse_from(["nutrilens", "history", "show", "abc"]).unwrap();
        assert!(matches!(
            args.command,
            Command::History {
                action: HistoryCommand::Show { ref id, json: false }
            } if id == "abc"
        ));

        let args = Args::try_parse_from(["nutrilens", "theme", "set", "ocean"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Theme {
                action: ThemeCommand::Set { ref name }
            } if name == "ocean"
        ));
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Args::try_parse_from(["nutrilens"]).is_err());
    }

    #[test]
    fn config_from_args() {
        let args = Args::try_parse_from([
            "nutrilens",
            "--api-key",
            "cli-key",
            "--storage-quota-bytes",
            "0",
            "key",
            "status",
        ])
        .unwrap();

        let config = NutrilensConfig::from(args);
        assert_eq!(config.llm.injected_api_key.as_deref(), Some("cli-key"));
        assert_eq!(config.storage.quota_bytes, None);
        assert_eq!(config.storage.storage_file(), PathBuf::from(".nutrilens/storage.json"));
    }

    #[test]
    fn blank_api_key_is_not_injected() {
        let args =
            Args::try_parse_from(["nutrilens", "--api-key", "  ", "key", "status"]).unwrap();
        let config = NutrilensConfig::from(args);
        assert_eq!(
            config.llm.injected_api_key.as_deref(),
            BUILD_TIME_API_KEY
        );
    }
}
