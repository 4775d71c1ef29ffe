use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

use super::raw::ConfigLayer;

#[derive(Debug, Default, Deserialize)]
struct FileShape {
    #[serde(default)]
    jira: ConfigLayer,
}

/// Load the `[jira]` table of a TOML configuration file.
pub(super) fn load(path: &Path) -> std::result::Result<ConfigLayer, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::FileRead {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        });
    }

    let shape: FileShape = ::config::Config::builder()
        .add_source(
            ::config::File::from(path)
                .format(::config::FileFormat::Toml)
                .required(true),
        )
        .build()
        .map_err(|err| ConfigError::Parse(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))?;
    Ok(shape.jira)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::load;
    use crate::error::ConfigError;

    #[test]
    fn reads_jira_table() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[jira]\nurl = \"https://jira.example.com\"\nissue_type = \"Incident\"\ntimeout = \"5s\""
        )
        .unwrap();

        let layer = load(file.path()).unwrap();
        assert_eq!(layer.url.as_deref(), Some("https://jira.example.com"));
        assert_eq!(layer.issue_type.as_deref(), Some("Incident"));
        assert_eq!(layer.timeout, Some(Duration::from_secs(5)));
        assert_eq!(layer.user, None);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
