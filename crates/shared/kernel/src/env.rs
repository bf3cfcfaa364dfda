//! Snapshot of the environment variables `moitt` understands.

use crate::error::KernelError;
use moitt_domain::constants::{
    ASLAK, BARTOSZ, ENV_ASLAK_PASSWORD, ENV_AWS_PROFILE, ENV_BARTOSZ_PASSWORD, ENV_CR_FILE,
    ENV_IKE_PASSWORD, ENV_PULL_SECRET, ENV_QE1_PASSWORD, ENV_QE2_PASSWORD, IKE, QE1,
    QE1_DEFAULT_PASSWORD, QE2, QE2_DEFAULT_PASSWORD,
};
use moitt_domain::users::TestUser;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

const KNOWN: [&str; 8] = [
    ENV_AWS_PROFILE,
    ENV_PULL_SECRET,
    ENV_CR_FILE,
    ENV_IKE_PASSWORD,
    ENV_ASLAK_PASSWORD,
    ENV_BARTOSZ_PASSWORD,
    ENV_QE1_PASSWORD,
    ENV_QE2_PASSWORD,
];

/// The known variables, captured once at startup. Empty values are dropped so
/// that `AWS_PROFILE=""` behaves exactly like an unset variable.
#[derive(Clone, Default)]
pub struct Environment {
    vars: BTreeMap<&'static str, String>,
}

impl Environment {
    /// Captures the known variables from the current process.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a snapshot from explicit pairs; unknown names are ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let pairs: BTreeMap<&str, &str> = pairs.into_iter().collect();
        Self::from_lookup(|name| pairs.get(name).map(|v| (*v).to_owned()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let vars = KNOWN
            .iter()
            .filter_map(|&name| lookup(name).filter(|v| !v.is_empty()).map(|v| (name, v)))
            .collect();
        Self { vars }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// # Errors
    /// Returns [`KernelError::MissingEnv`] when the variable is unset or empty.
    pub fn require(&self, name: &'static str) -> Result<&str, KernelError> {
        self.get(name).ok_or(KernelError::MissingEnv { name, context: None })
    }

    /// `AWS_PROFILE`, required.
    pub fn profile(&self) -> Result<&str, KernelError> {
        self.require(ENV_AWS_PROFILE)
    }

    /// `PULL_SEC`, required: path of the registry pull secret.
    pub fn pull_secret(&self) -> Result<PathBuf, KernelError> {
        self.require(ENV_PULL_SECRET).map(PathBuf::from)
    }

    /// `CR_FILE`, optional: control plane custom resource.
    #[must_use]
    pub fn cr_file(&self) -> Option<PathBuf> {
        self.get(ENV_CR_FILE).map(PathBuf::from)
    }

    /// `qe1`, whose password falls back to `qe1pw`.
    #[must_use]
    pub fn qe1(&self) -> TestUser {
        TestUser::new(QE1, self.get(ENV_QE1_PASSWORD).unwrap_or(QE1_DEFAULT_PASSWORD))
    }

    /// `qe2`, whose password falls back to `qe2pw`.
    #[must_use]
    pub fn qe2(&self) -> TestUser {
        TestUser::new(QE2, self.get(ENV_QE2_PASSWORD).unwrap_or(QE2_DEFAULT_PASSWORD))
    }

    /// The named developer accounts whose logins are verified after a cluster install.
    ///
    /// # Errors
    /// Returns [`KernelError::MissingEnv`] for the first password that is not set.
    pub fn login_users(&self) -> Result<Vec<TestUser>, KernelError> {
        [(IKE, ENV_IKE_PASSWORD), (ASLAK, ENV_ASLAK_PASSWORD), (BARTOSZ, ENV_BARTOSZ_PASSWORD)]
            .into_iter()
            .map(|(user, var)| self.require(var).map(|pw| TestUser::new(user, pw)))
            .collect()
    }

    /// Every account provisioned into the htpasswd identity provider.
    ///
    /// # Errors
    /// Same as [`Environment::login_users`].
    pub fn cluster_users(&self) -> Result<Vec<TestUser>, KernelError> {
        let mut users = self.login_users()?;
        users.push(self.qe1());
        users.push(self.qe2());
        Ok(users)
    }
}

// Only names are printed; values may be passwords.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment").field("set", &self.vars.keys().collect::<Vec<_>>()).finish()
    }
}
