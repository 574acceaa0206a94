//! Command lines handed over by the URI scheme handler:
//! `<scheme>://<command>/<param>`.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{Error, Result};

/// Commands the launcher knows how to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch and start the game identified by a server-issued token.
    RunGame { token: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub command: String,
    pub param: String,
}

impl LaunchRequest {
    /// Parse a command line for `scheme`.
    ///
    /// Shells hand the URI over quoted (`"%1"`), so one pair of surrounding
    /// double quotes is removed first.
    pub fn parse(arg: &str, scheme: &str) -> Result<Self> {
        let trimmed = arg
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(arg);

        let url = Url::parse(trimmed).map_err(|e| Error::command(arg, e.to_string()))?;
        if url.scheme() != scheme {
            return Err(Error::command(
                arg,
                format!("expected scheme '{}', found '{}'", scheme, url.scheme()),
            ));
        }

        let command = url.host_str().unwrap_or_default().to_string();
        if command.is_empty() {
            return Err(Error::command(arg, "missing command"));
        }
        let encoded = url.path().strip_prefix('/').unwrap_or(url.path());
        let param = percent_decode_str(encoded)
            .decode_utf8()
            .map_err(|e| Error::command(arg, format!("parameter is not UTF-8: {}", e)))?
            .into_owned();

        Ok(Self { command, param })
    }

    pub fn action(&self) -> Result<Action> {
        match self.command.as_str() {
            "rungame" => Ok(Action::RunGame {
                token: self.param.clone(),
            }),
            other => Err(Error::command(
                &format!("{}/{}", self.command, self.param),
                format!("unknown command '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_game() {
        let request = LaunchRequest::parse("pkglaunch://rungame/abc123", "pkglaunch").unwrap();
        assert_eq!(request.command, "rungame");
        assert_eq!(request.param, "abc123");
        assert_eq!(
            request.action().unwrap(),
            Action::RunGame {
                token: "abc123".into()
            }
        );
    }

    #[test]
    fn test_parse_strips_surrounding_quotes() {
        let request = LaunchRequest::parse("\"pkglaunch://rungame/abc\"", "pkglaunch").unwrap();
        assert_eq!(request.param, "abc");

        // A lone quote is not stripped
        assert!(LaunchRequest::parse("\"pkglaunch://rungame/abc", "pkglaunch").is_err());
    }

    #[test]
    fn test_parse_keeps_nested_param_path() {
        let request = LaunchRequest::parse("pkglaunch://rungame/a/b", "pkglaunch").unwrap();
        assert_eq!(request.param, "a/b");

        let request = LaunchRequest::parse("pkglaunch://rungame", "pkglaunch").unwrap();
        assert_eq!(request.param, "");
    }

    #[test]
    fn test_parse_decodes_param() {
        let request = LaunchRequest::parse("pkglaunch://rungame/a%20b", "pkglaunch").unwrap();
        assert_eq!(request.param, "a b");

        // Unencoded spaces come back as typed
        let request = LaunchRequest::parse("pkglaunch://rungame/a b", "pkglaunch").unwrap();
        assert_eq!(request.param, "a b");

        let request = LaunchRequest::parse("pkglaunch://rungame/k%2Fv%3D1", "pkglaunch").unwrap();
        assert_eq!(request.param, "k/v=1");
    }

    #[test]
    fn test_parse_rejects_non_utf8_param() {
        let err = LaunchRequest::parse("pkglaunch://rungame/%FF", "pkglaunch").unwrap_err();
        assert!(matches!(err, Error::Command { .. }));
    }

    #[test]
    fn test_parse_rejects_other_scheme() {
        let err = LaunchRequest::parse("https://rungame/abc", "pkglaunch").unwrap_err();
        assert!(matches!(err, Error::Command { .. }));
        assert!(err.to_string().contains("expected scheme 'pkglaunch'"));

        // Debug and stable launchers don't accept each other's links
        assert!(LaunchRequest::parse("pkglaunch://rungame/abc", "pkglaunch-debug").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(LaunchRequest::parse("not a url", "pkglaunch").is_err());
        assert!(LaunchRequest::parse("", "pkglaunch").is_err());
        assert!(LaunchRequest::parse("pkglaunch:rungame", "pkglaunch").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let request = LaunchRequest::parse("pkglaunch://uninstall/x", "pkglaunch").unwrap();
        let err = request.action().unwrap_err();
        assert!(err.to_string().contains("unknown command 'uninstall'"));
    }
}
