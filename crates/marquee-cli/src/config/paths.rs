//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// File name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// `dir` wins when given. Otherwise the file lives in `marquee/` under
/// `$XDG_CONFIG_HOME`, falling back to `~/.config`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when
/// `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    default_config_path(
        std::env::var_os("XDG_CONFIG_HOME").as_deref().map(Path::new),
        std::env::var_os("HOME").as_deref().map(Path::new),
    )
}

fn default_config_path(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    // Relative XDG paths are invalid and must be ignored.
    let base = match (xdg_config_home.filter(|p| p.is_absolute()), home) {
        (Some(xdg), _) => xdg.to_path_buf(),
        (None, Some(home)) => home.join(".config"),
        (None, None) => bail!("neither XDG_CONFIG_HOME nor HOME is set"),
    };
    Ok(base.join("marquee").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/marquee-config");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/marquee-config/config.toml"));
    }

    #[test]
    fn test_xdg_config_home_takes_precedence() {
        // Arrange & Act
        let path =
            default_config_path(Some(Path::new("/xdg")), Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/marquee/config.toml"));
    }

    #[test]
    fn test_falls_back_to_home() {
        // Arrange & Act
        let path = default_config_path(None, Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/u/.config/marquee/config.toml"));
    }

    #[test]
    fn test_relative_xdg_is_ignored() {
        // Arrange & Act
        let path =
            default_config_path(Some(Path::new("rel")), Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/u/.config/marquee/config.toml"));
    }

    #[test]
    fn test_no_base_directory_is_an_error() {
        // Arrange & Act
        let err = default_config_path(None, None).unwrap_err();

        // Assert
        assert!(err.to_string().contains("HOME"));
    }
}
