//! Active environment resolution.
//!
//! Binds the selected client and tier to a database URL read from
//! `DATABASE_URL_<TIER>_<CLIENT>` and to the client's token id table.

use tracing::info;

use super::settings::Config;
use crate::domain::environment::ensure_supported;
use crate::domain::{ActiveEnvironment, Client, EnvTier, TokenIds};
use crate::error::{ConfigError, Result};

/// Name of the variable holding the database URL for an environment.
#[must_use]
pub fn database_url_var(client: Client, tier: EnvTier) -> String {
    format!(
        "DATABASE_URL_{}_{}",
        tier.as_str().to_ascii_uppercase(),
        client.as_str().to_ascii_uppercase()
    )
}

/// Built-in commerce-backend product ids for each collection.
#[must_use]
pub fn default_token_ids(client: Client, tier: EnvTier) -> TokenIds {
    match (client, tier) {
        (Client::Euroleague, EnvTier::Dev) => TokenIds::from([
            ("CLUTCH", 13),
            ("CRUNCHTIME", 11),
            ("HEATINUP", 9),
            ("SLAMPACKED", 1357),
            ("SWISHIN", 12),
        ]),
        (Client::Euroleague, EnvTier::Qa) => TokenIds::from([
            ("CLUTCH", 8953),
            ("CRUNCHTIME", 8954),
            ("HEATINUP", 8955),
            ("SLAMPACKED", 8956),
            ("SWISHIN", 8957),
        ]),
        (Client::Euroleague, EnvTier::Uat) => TokenIds::from([
            ("CLUTCH", 53),
            ("CRUNCHTIME", 54),
            ("HEATINUP", 55),
            ("SLAMPACKED", 56),
            ("SWISHIN", 57),
        ]),
        _ => TokenIds::new(),
    }
}

/// Resolve the active environment from process environment variables.
///
/// # Errors
///
/// See [`resolve_environment_with`].
pub fn resolve_environment(
    client: Client,
    tier: EnvTier,
    config: &Config,
) -> Result<ActiveEnvironment> {
    resolve_environment_with(client, tier, config, |name| std::env::var(name).ok())
}

/// Resolve the active environment with an explicit variable lookup.
///
/// # Errors
///
/// Returns a validation error for an unsupported client/tier pair and
/// [`ConfigError::MissingEnv`] when the database URL variable is unset.
pub fn resolve_environment_with<F>(
    client: Client,
    tier: EnvTier,
    config: &Config,
    env: F,
) -> Result<ActiveEnvironment>
where
    F: Fn(&str) -> Option<String>,
{
    ensure_supported(client, tier)?;

    let var = database_url_var(client, tier);
    let database_url = env(&var)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingEnv { name: var })?;

    let mut token_ids = default_token_ids(client, tier);
    token_ids.extend(&config.token_id_overrides(client, tier));

    let environment = ActiveEnvironment::new(client, tier, database_url, token_ids)?
        .with_read_only(config.database.read_only);

    info!(
        component = "config",
        method = "resolve_environment",
        client = %client,
        tier = %tier,
        read_only = environment.read_only,
        "Environment resolved"
    );
    Ok(environment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn config() -> Config {
        Config::parse_toml_with("", |_| None).unwrap()
    }

    #[test]
    fn variable_name_is_tier_then_client() {
        assert_eq!(
            database_url_var(Client::Euroleague, EnvTier::Qa),
            "DATABASE_URL_QA_EUROLEAGUE"
        );
        assert_eq!(
            database_url_var(Client::Benfica, EnvTier::Prod),
            "DATABASE_URL_PROD_BENFICA"
        );
    }

    #[test]
    fn resolves_url_and_token_table() {
        let env = resolve_environment_with(Client::Euroleague, EnvTier::Uat, &config(), |name| {
            (name == "DATABASE_URL_UAT_EUROLEAGUE").then(|| "sqlite://uat.db".to_string())
        })
        .unwrap();

        assert_eq!(env.database_url, "sqlite://uat.db");
        assert_eq!(env.token_id("SlamPacked").unwrap(), 56);
        assert!(!env.read_only);
    }

    #[test]
    fn dev_table_matches_commerce_backend() {
        let ids = default_token_ids(Client::Euroleague, EnvTier::Dev);
        assert_eq!(ids.get("CLUTCH"), Some(13));
        assert_eq!(ids.get("CRUNCHTIME"), Some(11));
        assert_eq!(ids.get("HEATINUP"), Some(9));
        assert_eq!(ids.get("SLAMPACKED"), Some(1357));
        assert_eq!(ids.get("SWISHIN"), Some(12));
    }

    #[test]
    fn missing_database_url_names_the_variable() {
        let err = resolve_environment_with(Client::Benfica, EnvTier::Prod, &config(), |_| None)
            .unwrap_err();
        match err {
            Error::Config(ConfigError::MissingEnv { name }) => {
                assert_eq!(name, "DATABASE_URL_PROD_BENFICA");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unsupported_pair_fails_before_reading_env() {
        let err = resolve_environment_with(Client::Benfica, EnvTier::Dev, &config(), |_| {
            panic!("env must not be read")
        })
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn overrides_extend_the_builtin_table() {
        let config = Config::parse_toml_with("[token_ids.euroleague.dev]\nCLUTCH = 99", |_| None)
            .unwrap();
        let env = resolve_environment_with(Client::Euroleague, EnvTier::Dev, &config, |_| {
            Some("db".into())
        })
        .unwrap();
        assert_eq!(env.token_id("Clutch").unwrap(), 99);
        assert_eq!(env.token_id("Swishin").unwrap(), 12);
    }
}
