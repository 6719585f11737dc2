use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -L / --list-profiles: 現在有効なプロファイル一覧を表示
    pub list_profiles: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    /// -t / --temperature: 生成温度の上書き
    pub temperature: Option<f32>,
    /// 位置引数。空のときは既定のプロンプトを送る
    pub prompt_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            list_profiles: false,
            profile: None,
            model: None,
            temperature: None,
            prompt_args: Vec::new(),
        }
    }
}

/// 解析結果: 通常のConfig / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("plcgen")
        .about("Send one prompt to the generation service and print the generated Structured Text")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("list-profiles")
                .short('L')
                .long("list-profiles")
                .help("List currently available provider profiles")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Specify provider profile (gemini, echo, or a profiles.json entry)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Specify model name (e.g. gemini-1.5-pro)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("temperature")
                .short('t')
                .long("temperature")
                .value_name("value")
                .help("Generation temperature; lower values make the output more predictable")
                .value_parser(value_parser!(f32))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("positional")
                .index(1)
                .help("Prompt words (the built-in request is sent when omitted)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let help = matches.get_flag("help");
    let list_profiles = matches.get_flag("list-profiles");
    let profile = matches
        .get_one::<String>("profile")
        .map(|s| ProviderName::new(s.clone()));
    let model = matches
        .get_one::<String>("model")
        .map(|s| ModelName::new(s.clone()));
    let temperature = matches.get_one::<f32>("temperature").copied();
    let prompt_args = matches
        .get_many::<String>("positional")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    Config {
        help,
        list_profiles,
        profile,
        model,
        temperature,
        prompt_args,
    }
}

/// コマンドライン引数を解析する
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::usage(e.to_string()))?;
    Ok(outcome_from_matches(&matches))
}

fn outcome_from_matches(matches: &clap::ArgMatches) -> ParseOutcome {
    if let Some(shell) = matches.get_one::<Shell>("generate") {
        return ParseOutcome::GenerateCompletion(*shell);
    }
    ParseOutcome::Config(matches_to_config(matches))
}

/// 補完スクリプトを標準出力へ生成する
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> ParseOutcome {
        let matches = build_clap_command()
            .try_get_matches_from(argv)
            .expect("arguments should parse");
        outcome_from_matches(&matches)
    }

    fn config(argv: &[&str]) -> Config {
        match parse(argv) {
            ParseOutcome::Config(c) => c,
            other => panic!("expected Config, got {:?}", other),
        }
    }

    #[test]
    fn test_no_args_gives_defaults() {
        let c = config(&["plcgen"]);
        assert_eq!(c, Config::default());
    }

    #[test]
    fn test_prompt_words_collected() {
        let c = config(&["plcgen", "write", "a", "debounce", "timer"]);
        assert_eq!(c.prompt_args, vec!["write", "a", "debounce", "timer"]);
    }

    #[test]
    fn test_profile_and_model_flags() {
        let c = config(&["plcgen", "-p", "echo", "-m", "gemini-1.5-pro", "hello"]);
        assert_eq!(c.profile, Some(ProviderName::new("echo")));
        assert_eq!(c.model, Some(ModelName::new("gemini-1.5-pro")));
        assert_eq!(c.prompt_args, vec!["hello"]);
    }

    #[test]
    fn test_temperature_flag() {
        let c = config(&["plcgen", "-t", "0.7"]);
        assert_eq!(c.temperature, Some(0.7));
    }

    #[test]
    fn test_temperature_rejects_non_number() {
        let result = build_clap_command().try_get_matches_from(["plcgen", "-t", "hot"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_and_list_profiles_flags() {
        assert!(config(&["plcgen", "-h"]).help);
        assert!(config(&["plcgen", "-L"]).list_profiles);
    }

    #[test]
    fn test_generate_outcome() {
        match parse(&["plcgen", "--generate", "bash"]) {
            ParseOutcome::GenerateCompletion(shell) => assert_eq!(shell, Shell::Bash),
            other => panic!("expected GenerateCompletion, got {:?}", other),
        }
    }
}
