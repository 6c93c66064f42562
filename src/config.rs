//! Process-level settings taken from the Lambda environment.

use std::env;

/// Name of the variable selecting the deployment profile.
pub const PROFILE_VAR: &str = "PROFILE";

/// Region the execution environment runs in, supplied by the platform.
pub const REGION_VAR: &str = "AWS_REGION";

/// Deployment profile. Anything other than `dev` is production.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Profile {
    Dev,
    #[default]
    Prod,
}

impl Profile {
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("dev") => Profile::Dev,
            _ => Profile::Prod,
        }
    }

    pub fn is_dev(self) -> bool {
        self == Profile::Dev
    }

    /// Default log filter directive when `RUST_LOG` is not set.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Profile::Dev => "debug",
            Profile::Prod => "info",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub profile: Profile,

    /// The execution region, if one could be determined.
    pub region: Option<String>,
}

impl Settings {
    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let profile = Profile::from_value(lookup(PROFILE_VAR).as_deref());
        let region = lookup(REGION_VAR).filter(|r| !r.is_empty());

        Settings { profile, region }
    }

    /// Read settings from the process environment.
    ///
    /// Lambda always sets `AWS_REGION`, but for local runs we let the AWS
    /// SDK's provider chain (profile files, `AWS_DEFAULT_REGION`, ...) have
    /// a go at it too.
    pub async fn load() -> Self {
        let mut settings = Self::from_lookup(|key| env::var(key).ok());

        if settings.region.is_none() {
            let config = aws_config::load_from_env().await;
            settings.region = config.region().map(|r| r.to_string());
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn dev_profile_only_for_exact_value() {
        assert_eq!(settings_from(&[("PROFILE", "dev")]).profile, Profile::Dev);
        assert_eq!(settings_from(&[("PROFILE", "prod")]).profile, Profile::Prod);
        assert_eq!(settings_from(&[("PROFILE", "DEV")]).profile, Profile::Prod);
        assert_eq!(settings_from(&[]).profile, Profile::Prod);
    }

    #[test]
    fn region_from_platform_variable() {
        let settings = settings_from(&[("AWS_REGION", "eu-west-1")]);
        assert_eq!(settings.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn empty_region_is_unset() {
        assert_eq!(settings_from(&[("AWS_REGION", "")]).region, None);
    }

    #[test]
    fn log_level_follows_profile() {
        assert_eq!(Profile::Dev.default_log_level(), "debug");
        assert_eq!(Profile::Prod.default_log_level(), "info");
    }
}
