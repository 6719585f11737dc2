//! profiles.jsonの読み込みとプロバイダ解決

use crate::domain::ProviderName;
use crate::error::Error;
use crate::llm::config::{ProfilesConfig, ProviderTypeKind};
use crate::llm::factory::ProviderType;
use std::env;
use std::path::{Path, PathBuf};

/// 解決済みプロバイダ（ProviderType + オプション）
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    /// 解決に使ったプロファイル名（例: "gemini", "my_gemini"）。エラー表示用
    pub profile_name: String,
    pub provider_type: ProviderType,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
}

/// profiles.jsonのパスを環境変数から解決する
///
/// $PLCGEN_HOME/config/profiles.json → $XDG_CONFIG_HOME/plcgen/profiles.json
/// → ~/.config/plcgen/profiles.json の順。どれも解決できなければNone。
pub fn profiles_path_from_env() -> Option<PathBuf> {
    if let Ok(home) = env::var("PLCGEN_HOME") {
        if !home.is_empty() {
            return Some(PathBuf::from(home).join("config").join("profiles.json"));
        }
    }

    let config_base = env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var("HOME")
                .ok()
                .filter(|s| !s.is_empty())
                .map(|h| PathBuf::from(h).join(".config"))
        })?;

    Some(config_base.join("plcgen").join("profiles.json"))
}

/// profiles.jsonを読み込む。ファイルが無ければOk(None)、JSONが壊れていればErr（メッセージにパス含める）
pub fn load_profiles_config(path: &Path) -> Result<Option<ProfilesConfig>, Error> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
    ProfilesConfig::parse(&contents)
        .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
        .map(Some)
}

fn provider_type_kind_to_provider_type(k: ProviderTypeKind) -> ProviderType {
    match k {
        ProviderTypeKind::Gemini => ProviderType::Gemini,
        ProviderTypeKind::Echo => ProviderType::Echo,
    }
}

/// 利用可能なビルトインプロバイダ名
fn builtin_provider_names() -> &'static [&'static str] {
    &["gemini", "echo"]
}

/// 要求されたプロファイル名（Noneの場合はdefault）とProfilesConfigからResolvedProviderを解決する。
/// 不明なプロファイルの場合はError::usage（is_usage == true）で利用可能一覧を返す。
pub fn resolve_provider(
    requested: Option<&ProviderName>,
    cfg: Option<&ProfilesConfig>,
) -> Result<ResolvedProvider, Error> {
    let effective_name: &str = requested.map(|r| r.as_ref()).unwrap_or_else(|| {
        cfg.and_then(|c| c.default_provider.as_deref())
            .unwrap_or("gemini")
    });

    // 1) cfg.providersに名前があればそれを優先
    if let Some(cfg) = cfg {
        if let Some(profile) = cfg.providers.get(effective_name) {
            let provider_type = provider_type_kind_to_provider_type(profile.type_);
            return Ok(ResolvedProvider {
                profile_name: effective_name.to_string(),
                provider_type,
                model: profile.model.clone(),
                api_key_env: profile.api_key_env.clone(),
                temperature: profile.temperature,
            });
        }
    }

    // 2) ビルトイン（ProviderType::from_str）を試す
    if let Some(provider_type) = ProviderType::from_str(effective_name) {
        return Ok(ResolvedProvider {
            profile_name: effective_name.to_string(),
            provider_type,
            model: None,
            api_key_env: None,
            temperature: None,
        });
    }

    // 3) どれも無ければusageエラー
    let mut available: Vec<String> = builtin_provider_names()
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if let Some(cfg) = cfg {
        for k in cfg.providers.keys() {
            if !available.contains(k) {
                available.push(k.clone());
            }
        }
    }
    available.sort();
    Err(Error::usage(format!(
        "Unknown provider: '{}'. Available: {}",
        effective_name,
        available.join(", ")
    )))
}
