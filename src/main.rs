use std::path::Path;
use std::process::ExitCode;

use glowtrail::{ConfigError, Effect, EffectConfig, Preset};

const USAGE: &str = "usage: glowtrail [galaxy|classic|path/to/config.json]";

/// A preset name, or a path to a JSON config file.
fn load(arg: Option<String>) -> Result<EffectConfig, ConfigError> {
    match arg {
        None => Ok(Preset::default().config()),
        Some(arg) if is_config_path(&arg) => EffectConfig::load(&arg),
        Some(arg) => Ok(arg.parse::<Preset>()?.config()),
    }
}

fn is_config_path(arg: &str) -> bool {
    arg.ends_with(".json") || Path::new(arg).is_file()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arg = std::env::args().nth(1);
    if matches!(arg.as_deref(), Some("-h" | "--help")) {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let config = match load(arg) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    match Effect::new().with_config(config).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        assert_eq!(load(Some("classic".into())).unwrap(), Preset::Classic.config());
        assert_eq!(load(None).unwrap(), Preset::Galaxy.config());
        assert!(matches!(load(Some("nebula".into())), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_config_file_without_json_suffix() {
        let path = std::env::temp_dir().join(format!("glowtrail-{}.conf", std::process::id()));
        std::fs::write(&path, r#"{ "theme_interval_ms": 2500 }"#).unwrap();

        let config = load(Some(path.to_string_lossy().into_owned()));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().theme_interval_ms, 2500);
    }

    #[test]
    fn test_missing_json_path_is_an_error() {
        assert!(load(Some("/nonexistent/glowtrail.json".into())).is_err());
    }
}
