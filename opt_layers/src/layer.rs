//! Boundary to configuration providers.
//!
//! Loading, merging and caching configuration files belongs to the caller.
//! The resolver only needs the finished dictionary of option values, which
//! these helpers extract from any [`figment::Provider`].

use figment::{Figment, Provider};
use tracing::debug;

use crate::error::LayerError;
use crate::value::{Dict, Value};

/// Extract the dictionary of option values produced by `provider`.
///
/// ```rust
/// use figment::providers::Serialized;
/// use opt_layers::{Value, config_from_provider};
///
/// let config = config_from_provider(Serialized::defaults(serde_json::json!({"port": 7000})))?;
/// assert_eq!(config.get("port"), Some(&Value::from(7000)));
/// # Ok::<(), opt_layers::LayerError>(())
/// ```
///
/// # Errors
///
/// Returns [`LayerError::Extract`] when the provider fails or its data cannot
/// be represented as option values.
pub fn config_from_provider<P: Provider>(provider: P) -> Result<Dict, LayerError> {
    let figment = Figment::from(provider);
    let config: Dict = figment.extract()?;
    debug!(keys = config.len(), "extracted configuration layer");
    Ok(config)
}

/// Extract the dictionary stored under `key` in the data of `provider`.
///
/// A missing or `null` section yields an empty dictionary. Nested keys are
/// separated with dots, as in `server.http`.
///
/// # Errors
///
/// Returns [`LayerError::Extract`] when the provider fails and
/// [`LayerError::NotADictionary`] when the section holds another kind of
/// value.
pub fn config_section<P: Provider>(provider: P, key: &str) -> Result<Dict, LayerError> {
    let figment = Figment::from(provider);
    if !figment.contains(key) {
        debug!(section = key, "configuration section is absent");
        return Ok(Dict::new());
    }
    match figment.extract_inner::<Value>(key)? {
        Value::Object(config) => {
            debug!(section = key, keys = config.len(), "extracted configuration section");
            Ok(config)
        }
        Value::Null => Ok(Dict::new()),
        other => Err(LayerError::NotADictionary { kind: other.kind() }),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, anyhow, ensure};
    use figment::Jail;
    use figment::providers::{Format, Serialized, Toml};
    use serde_json::json;

    use super::*;

    fn with_jail<F>(f: F) -> Result<()>
    where
        F: FnOnce(&mut Jail) -> Result<()>,
    {
        Jail::try_with(|jail| f(jail).map_err(|err| figment::Error::from(err.to_string())))
            .map_err(|err| anyhow!(err.to_string()))
    }

    #[test]
    fn reads_toml_files() -> Result<()> {
        with_jail(|jail| {
            jail.create_file(
                "app.toml",
                r#"
                    port = 7000
                    log-level = "debug"
                    tags = ["a", "b"]

                    [server]
                    host = "example.org"
                "#,
            )?;
            let config = config_from_provider(Toml::file("app.toml"))?;
            ensure!(config.get("port") == Some(&Value::from(7000)));
            ensure!(config.get("log-level") == Some(&Value::from("debug")));
            ensure!(
                config.get("tags") == Some(&Value::from(vec![Value::from("a"), Value::from("b")]))
            );

            let server = config_section(Toml::file("app.toml"), "server")?;
            ensure!(server.get("host") == Some(&Value::from("example.org")));
            Ok(())
        })
    }

    #[test]
    fn missing_sections_are_empty() -> Result<()> {
        let config = config_section(Serialized::defaults(json!({"port": 1})), "server")?;
        ensure!(config.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_scalar_sections() -> Result<()> {
        let err = config_section(Serialized::defaults(json!({"server": 8})), "server")
            .err()
            .ok_or_else(|| anyhow!("expected an error"))?;
        ensure!(matches!(err, LayerError::NotADictionary { kind: "number" }), "{err}");
        Ok(())
    }

    #[test]
    fn reports_malformed_files() -> Result<()> {
        with_jail(|jail| {
            jail.create_file("broken.toml", "port = ")?;
            let err = config_from_provider(Toml::file("broken.toml"))
                .err()
                .ok_or_else(|| anyhow!("expected an error"))?;
            ensure!(matches!(err, LayerError::Extract(_)), "{err}");
            ensure!(err.to_string().starts_with("failed to extract configuration"));
            Ok(())
        })
    }
}
