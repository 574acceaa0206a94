use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use crate::config::{ClientSettings, LauncherConfig};
use crate::launcher::{SelfInstaller, SelfLocation, handler_command};
use crate::runtime::Runtime;

use super::paths::default_install_root;

/// Copy the running launcher into `<root>/<name>~<version>/`.
///
/// Returns the installed executable, or `None` when the user declined.
#[tracing::instrument(skip(runtime, config))]
pub fn install<R: Runtime>(
    runtime: &R,
    config: &LauncherConfig,
    install_root: Option<PathBuf>,
    yes: bool,
) -> Result<Option<PathBuf>> {
    let root = match install_root {
        Some(path) => path,
        None => default_install_root(runtime)?,
    };
    info!("Using install root: {}", root.display());

    let location = SelfLocation::detect(runtime)?;
    let installer = SelfInstaller::new(runtime, config);

    if !yes {
        let prompt = format!(
            "Install {} {} into {}?",
            config.package_name,
            config.version,
            installer.target_dir(&root).display()
        );
        if !runtime.confirm(&prompt)? {
            println!("Installation cancelled.");
            return Ok(None);
        }
    }

    let installed = installer
        .install(&location, &root)
        .with_context(|| format!("Failed to install {}", config.install_dir_name()))?;

    let installed_location = SelfLocation::from_path(&installed);
    if let Some(settings_path) = ClientSettings::path(&installed_location, config) {
        let settings = ClientSettings::load(runtime, &settings_path);
        settings.store(runtime, &settings_path)?;
        debug!("Client id {} stored in {:?}", settings.client, settings_path);
    }

    println!("Installed {} to {}", config.install_dir_name(), installed.display());
    println!(
        "Register the {}:// scheme handler as: {}",
        config.scheme,
        handler_command(&installed)
    );

    Ok(Some(installed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{test_downloads, test_home, test_root};
    use mockall::predicate::eq;

    fn config() -> LauncherConfig {
        LauncherConfig::default()
            .with_package_name("pkglaunch")
            .with_version("1.0.0")
    }

    fn expect_download_exe(runtime: &mut MockRuntime) {
        runtime
            .expect_current_exe()
            .returning(|| Ok(test_downloads().join("pkglaunch")));
    }

    #[test]
    fn test_install_with_yes_skips_prompt() {
        // --- Setup ---
        let mut runtime = MockRuntime::new();
        let target_dir = test_root().join("pkglaunch~1.0.0");
        let target = target_dir.join(config().executable_name());
        let settings = target_dir.join("pkglaunch.json");

        expect_download_exe(&mut runtime);
        runtime.expect_confirm().never();

        // Directory creation and copy
        runtime.expect_is_dir().returning(|_| false);
        runtime
            .expect_create_dir_all()
            .with(eq(target_dir.clone()))
            .returning(|_| Ok(()));
        runtime
            .expect_copy()
            .with(eq(test_downloads().join("pkglaunch")), eq(target.clone()))
            .returning(|_, _| Ok(2048));

        // Client settings created next to the executable
        runtime
            .expect_exists()
            .with(eq(settings.clone()))
            .returning(|_| false);
        runtime
            .expect_write()
            .withf(move |path, content| {
                path.to_path_buf() == settings
                    && String::from_utf8_lossy(content).contains("\"client\"")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        // --- Execute ---
        let installed = install(&runtime, &config(), Some(test_root()), true).unwrap();

        // --- Verify ---
        assert_eq!(installed, Some(target));
    }

    #[test]
    fn test_install_declined() {
        let mut runtime = MockRuntime::new();
        expect_download_exe(&mut runtime);
        runtime
            .expect_confirm()
            .withf(|prompt| prompt.starts_with("Install pkglaunch 1.0.0 into"))
            .returning(|_| Ok(false));
        runtime.expect_copy().never();
        runtime.expect_create_dir_all().never();

        let installed = install(&runtime, &config(), Some(test_root()), false).unwrap();
        assert_eq!(installed, None);
    }

    #[test]
    fn test_install_defaults_to_home_root() {
        let mut runtime = MockRuntime::new();
        let target_dir = test_home().join(".pkglaunch").join("pkglaunch~1.0.0");

        runtime.expect_is_privileged().returning(|| false);
        runtime.expect_home_dir().returning(|| Some(test_home()));
        expect_download_exe(&mut runtime);
        runtime.expect_confirm().returning(|_| Ok(true));
        runtime.expect_is_dir().returning(|_| true);
        runtime.expect_copy().returning(|_, _| Ok(1));
        runtime.expect_exists().returning(|_| false);
        runtime.expect_write().returning(|_, _| Ok(()));

        let installed = install(&runtime, &config(), None, false).unwrap().unwrap();
        assert!(installed.starts_with(target_dir));
    }

    #[test]
    fn test_install_copy_failure_has_context() {
        let mut runtime = MockRuntime::new();
        expect_download_exe(&mut runtime);
        runtime.expect_is_dir().returning(|_| true);
        runtime
            .expect_copy()
            .returning(|_, _| Err(anyhow::anyhow!("disk full")));
        runtime.expect_write().never();

        let err = install(&runtime, &config(), Some(test_root()), true).unwrap_err();
        assert!(err.to_string().contains("Failed to install pkglaunch~1.0.0"));
    }
}
