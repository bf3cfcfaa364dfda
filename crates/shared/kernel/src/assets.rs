//! Layout of the `openshift-install` assets directory.

use crate::error::{KernelError, KernelErrorExt};
use moitt_domain::constants::{INSTALL_CONFIG_FILE, KUBEADMIN_PASSWORD_FILE, KUBECONFIG_FILE};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<assets>/auth/kubeconfig`, exported as `KUBECONFIG` to every tool.
    #[must_use]
    pub fn kubeconfig(&self) -> PathBuf {
        self.root.join(KUBECONFIG_FILE)
    }

    #[must_use]
    pub fn kubeadmin_password_file(&self) -> PathBuf {
        self.root.join(KUBEADMIN_PASSWORD_FILE)
    }

    #[must_use]
    pub fn install_config(&self) -> PathBuf {
        self.root.join(INSTALL_CONFIG_FILE)
    }

    /// Reads the generated `kubeadmin` password, without trailing whitespace.
    ///
    /// The file is read on every call; the installer may rewrite it between logins.
    ///
    /// # Errors
    /// Returns [`KernelError::Io`] if the file cannot be read.
    pub fn read_kubeadmin_password(&self) -> Result<String, KernelError> {
        let path = self.kubeadmin_password_file();
        let raw = fs::read_to_string(&path)
            .context(format!("Failed to read kubeadmin password from {}", path.display()))?;
        Ok(raw.trim_end().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn kubeconfig_is_derived_from_the_directory() {
        let assets = AssetPaths::new("./assets");
        assert_eq!(assets.kubeconfig(), PathBuf::from("./assets/auth/kubeconfig"));
        assert_eq!(
            AssetPaths::new("/tmp/cluster-a").kubeconfig(),
            PathBuf::from("/tmp/cluster-a/auth/kubeconfig")
        );
    }

    #[test]
    fn password_is_read_fresh_and_trimmed() {
        let dir = tempdir().unwrap();
        let assets = AssetPaths::new(dir.path());
        fs::create_dir_all(dir.path().join("auth")).unwrap();

        fs::write(assets.kubeadmin_password_file(), "abcde-fghij\n").unwrap();
        assert_eq!(assets.read_kubeadmin_password().unwrap(), "abcde-fghij");

        fs::write(assets.kubeadmin_password_file(), "rotated").unwrap();
        assert_eq!(assets.read_kubeadmin_password().unwrap(), "rotated");
    }

    #[test]
    fn missing_password_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = AssetPaths::new(dir.path()).read_kubeadmin_password().unwrap_err();
        assert!(matches!(err, KernelError::Io { .. }));
        assert!(err.to_string().contains("kubeadmin-password"));
    }
}
