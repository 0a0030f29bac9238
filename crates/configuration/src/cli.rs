use crate::settings::Config;
use core_types::Locale;
use std::path::PathBuf;

/// Command-line flags that take precedence over every other configuration source.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct CliOverrides {
    /// Path to the TOML configuration file (defaults to ./config.toml when present).
    #[cfg_attr(feature = "clap", arg(long, short))]
    pub config: Option<PathBuf>,

    /// Interface to bind the HTTP server to.
    #[cfg_attr(feature = "clap", arg(long))]
    pub host: Option<String>,

    /// Port to bind the HTTP server to.
    #[cfg_attr(feature = "clap", arg(long, short))]
    pub port: Option<u16>,

    /// Default log filter (e.g., "debug" or "web_server=debug,info").
    #[cfg_attr(feature = "clap", arg(long))]
    pub log_level: Option<String>,

    /// Language of user-facing messages: "ar" or "en".
    #[cfg_attr(feature = "clap", arg(long))]
    pub locale: Option<Locale>,
}

impl CliOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_overrides_given_flags() {
        let mut config = Config::default();
        let overrides = CliOverrides {
            port: Some(4000),
            ..Default::default()
        };
        overrides.apply(&mut config);
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.locale, Locale::Ar);
    }

    #[test]
    fn test_locale_override() {
        let mut config = Config::default();
        let overrides = CliOverrides {
            locale: Some("English".parse().unwrap()),
            ..Default::default()
        };
        overrides.apply(&mut config);
        assert_eq!(config.locale, Locale::En);
    }
}
