use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Claude,
    Codex,
    Gemini,
}

impl AiProvider {
    pub fn command_name(&self) -> &'static str {
        match self {
            AiProvider::Claude => "claude",
            AiProvider::Codex => "codex",
            AiProvider::Gemini => "gemini",
        }
    }

    /// 子プロセスにAPIキーを渡す環境変数名
    pub fn api_key_env(&self) -> &'static str {
        match self {
            AiProvider::Claude => "ANTHROPIC_API_KEY",
            AiProvider::Codex => "OPENAI_API_KEY",
            AiProvider::Gemini => "GEMINI_API_KEY",
        }
    }

    /// CLI引数を組み立てる
    pub fn build_args(&self, system: &str, user: &str, model: Option<&str>) -> Vec<String> {
        let mut args = Vec::new();
        match self {
            AiProvider::Claude => {
                args.extend(["-p".to_string(), user.to_string()]);
                args.extend(["--system-prompt".to_string(), system.to_string()]);
                args.extend(["--output-format".to_string(), "text".to_string()]);
            }
            AiProvider::Codex => {
                args.extend(["exec".to_string(), format!("{}\n\n{}", system, user)]);
            }
            AiProvider::Gemini => {
                args.extend(["-p".to_string(), format!("{}\n\n{}", system, user)]);
            }
        }
        if let Some(model) = model.filter(|m| !m.is_empty()) {
            args.extend(["--model".to_string(), model.to_string()]);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claude_args_keep_system_separate() {
        let args = AiProvider::Claude.build_args("sys", "user", None);
        assert_eq!(
            args,
            vec!["-p", "user", "--system-prompt", "sys", "--output-format", "text"]
        );
    }

    #[test]
    fn test_other_providers_prefix_system() {
        let args = AiProvider::Gemini.build_args("sys", "user", Some("gemini-2.0-flash"));
        assert_eq!(args[0], "-p");
        assert_eq!(args[1], "sys\n\nuser");
        assert_eq!(&args[2..], ["--model", "gemini-2.0-flash"]);

        let args = AiProvider::Codex.build_args("sys", "user", Some(""));
        assert_eq!(args, vec!["exec", "sys\n\nuser"]);
    }
}
