mod cli;
mod domain;
mod report;


use std::collections::BTreeMap;
use std::process;

use cli::{parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::llm::config::ProfilesConfig;
use common::llm::factory::create_driver;
use common::llm::provider::{GenerationConfig, LlmProvider};
use common::llm::resolver::{load_profiles_config, profiles_path_from_env, resolve_provider};
use common::log::{now_iso8601, FileJsonLog, Log, LogLevel, LogRecord, NoopLog};

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
                eprintln!("plcgen: {}", e);
            } else {
                eprintln!("{}", report::render_failure(&e));
            }
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let outcome = parse_args()?;
    let config = match outcome {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    run_config(config)
}

/// 固定のシーケンス（検証 → 設定 → 送信 → 報告）を実行する
///
/// リトライ・並行実行は無く、ネットワーク呼び出しは最大1回。
pub fn run_config(config: Config) -> Result<i32, Error> {
    if config.help {
        print_help();
        return Ok(0);
    }

    let profiles = match profiles_path_from_env() {
        Some(path) => load_profiles_config(&path)?,
        None => None,
    };

    if config.list_profiles {
        print_profiles(profiles.as_ref());
        return Ok(0);
    }

    let logger = make_logger();

    let resolved = resolve_provider(config.profile.as_ref(), profiles.as_ref())?;
    // CLI指定 > プロファイル > 組み込みデフォルト
    let model = config
        .model
        .map(|m| m.as_str().to_string())
        .or_else(|| resolved.model.clone());
    let generation = GenerationConfig::new(config.temperature.or(resolved.temperature));
    let prompt = domain::prompt_from_args(&config.prompt_args);

    let _ = logger.log(&LogRecord {
        ts: now_iso8601(),
        level: LogLevel::Info,
        message: "request started".to_string(),
        layer: Some("cli".to_string()),
        kind: Some("lifecycle".to_string()),
        fields: {
            let mut m = BTreeMap::new();
            m.insert(
                "profile".to_string(),
                serde_json::json!(resolved.profile_name.as_str()),
            );
            if let Some(ref model) = model {
                m.insert("model".to_string(), serde_json::json!(model.as_str()));
            }
            m.insert("prompt_chars".to_string(), serde_json::json!(prompt.len()));
            Some(m)
        },
    });

    let result = create_driver(
        resolved.provider_type,
        model,
        resolved.api_key_env.clone(),
        generation,
    )
    .and_then(|driver| {
        eprintln!("Sending prompt to the {} provider...", driver.provider().name());
        driver.generate(&prompt)
    });

    let exit_code = match &result {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    };
    let _ = logger.log(&LogRecord {
        ts: now_iso8601(),
        level: LogLevel::Info,
        message: "request finished".to_string(),
        layer: Some("cli".to_string()),
        kind: Some("lifecycle".to_string()),
        fields: {
            let mut m = BTreeMap::new();
            m.insert("exit_code".to_string(), serde_json::json!(exit_code));
            Some(m)
        },
    });
    if let Err(ref e) = result {
        let _ = logger.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Error,
            message: e.to_string(),
            layer: Some("cli".to_string()),
            kind: Some("error".to_string()),
            fields: {
                let mut m = BTreeMap::new();
                m.insert("error_kind".to_string(), serde_json::json!(e.kind()));
                Some(m)
            },
        });
    }

    let completion = result?;
    println!("{}", report::render_completion(&completion));
    Ok(0)
}

/// PLCGEN_LOGが指すファイルへJSONLを追記する。未設定なら何もしない
fn make_logger() -> Box<dyn Log> {
    match std::env::var("PLCGEN_LOG") {
        Ok(path) if !path.is_empty() => Box::new(FileJsonLog::new(path)),
        _ => Box::new(NoopLog),
    }
}

fn print_profiles(cfg: Option<&ProfilesConfig>) {
    let mut names: Vec<String> = ["gemini", "echo"].iter().map(|s| (*s).to_string()).collect();
    if let Some(cfg) = cfg {
        for k in cfg.providers.keys() {
            if !names.contains(k) {
                names.push(k.clone());
            }
        }
    }
    names.sort();
    let default = cfg
        .and_then(|c| c.default_provider.clone())
        .unwrap_or_else(|| "gemini".to_string());
    for name in &names {
        if *name == default {
            println!("{} (default)", name);
        } else {
            println!("{}", name);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: plcgen [options] [prompt...]");
}

fn print_help() {
    println!("Usage: plcgen [options] [prompt...]");
    println!("Options:");
    println!("  -h, --help                 Show this help message");
    println!("  -L, --list-profiles        List available provider profiles (from profiles.json + built-ins)");
    println!("  -p, --profile <profile>    Specify provider profile (gemini, echo, or a profiles.json entry).");
    println!("                             Default: profiles.json default, or gemini if not set.");
    println!("  -m, --model <model>        Specify model name (e.g. gemini-1.5-pro). Default: profile default, or gemini-1.5-flash");
    println!("  -t, --temperature <value>  Generation temperature; lower values make the output more predictable.");
    println!("                             Default: profile default, or 0.3");
    println!("  --generate <shell>         Generate shell completion script (bash, zsh, fish). Source the output to enable tab completion.");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY  Google AI API key (the variable name can be changed per profile with api_key_env)");
    println!("  PLCGEN_HOME     Home directory. Profiles: $PLCGEN_HOME/config/profiles.json");
    println!("                  If unset, $XDG_CONFIG_HOME/plcgen (e.g. ~/.config/plcgen) is used.");
    println!("  PLCGEN_LOG      Append one JSONL record per lifecycle event to this file.");
    println!();
    println!("Description:");
    println!("  Send a single prompt to the generation service and print the generated");
    println!("  IEC 61131-3 Structured Text along with the token usage.");
    println!("  With no prompt words, the built-in tank/pipe control request is sent.");
    println!();
    println!("Examples:");
    println!("  plcgen");
    println!("  plcgen -t 0.7 Write a Structured Text function block for a debounce timer");
    println!("  plcgen --profile echo Smoke test without network access");
}
