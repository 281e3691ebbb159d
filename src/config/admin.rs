//! Administrator credentials
//!
//! Credentials are resolved by the hosting application (config file or
//! environment) and checked there. Engine operations never see them.

use crate::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Level of access granted by a password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminRole {
    Admin,
    /// Can do everything an admin can, but its password cannot be changed here
    SuperAdmin,
}

/// Admin and super-admin passwords
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    #[serde(default)]
    pub admin_password: Option<String>,
    #[serde(default)]
    pub super_password: Option<String>,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("admin_password", &self.admin_password.as_ref().map(|_| "***"))
            .field("super_password", &self.super_password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl AdminCredentials {
    pub fn new(admin_password: impl Into<String>, super_password: impl Into<String>) -> Self {
        Self {
            admin_password: Some(admin_password.into()),
            super_password: Some(super_password.into()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.admin_password.is_some() || self.super_password.is_some()
    }

    /// Role granted by a password, if any
    pub fn authenticate(&self, password: &str) -> Option<AdminRole> {
        if self.super_password.as_deref() == Some(password) {
            debug!("Authenticated as super admin");
            Some(AdminRole::SuperAdmin)
        } else if self.admin_password.as_deref() == Some(password) {
            debug!("Authenticated as admin");
            Some(AdminRole::Admin)
        } else {
            warn!("Rejected admin password");
            None
        }
    }

    /// Require an admin role, failing with `Unauthorized`
    pub fn require_admin(&self, password: Option<&str>) -> Result<AdminRole> {
        password
            .and_then(|pw| self.authenticate(pw))
            .ok_or_else(|| {
                LeagueError::Unauthorized {
                    reason: "an admin password is required for this operation".to_string(),
                }
                .into()
            })
    }

    /// Replace the admin password.
    ///
    /// The current admin password must be given; the super password cannot be
    /// used to change it, and cannot become the admin password.
    pub fn change_admin_password(&self, current: &str, next: &str) -> Result<AdminCredentials> {
        match self.authenticate(current) {
            Some(AdminRole::Admin) => {}
            Some(AdminRole::SuperAdmin) => {
                return Err(LeagueError::Unauthorized {
                    reason: "the super admin password cannot be changed".to_string(),
                }
                .into())
            }
            None => {
                return Err(LeagueError::Unauthorized {
                    reason: "current password is incorrect".to_string(),
                }
                .into())
            }
        }

        let next = next.trim();
        if next.is_empty() {
            return Err(LeagueError::ConfigurationError {
                message: "new password cannot be empty".to_string(),
            }
            .into());
        }
        if self.super_password.as_deref() == Some(next) {
            return Err(LeagueError::Unauthorized {
                reason: "that password is not allowed".to_string(),
            }
            .into());
        }

        Ok(AdminCredentials {
            admin_password: Some(next.to_string()),
            super_password: self.super_password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_roles() {
        let creds = AdminCredentials::new("club", "root");
        assert_eq!(creds.authenticate("club"), Some(AdminRole::Admin));
        assert_eq!(creds.authenticate("root"), Some(AdminRole::SuperAdmin));
        assert_eq!(creds.authenticate("nope"), None);
        assert!(creds.require_admin(None).is_err());
        assert!(creds.require_admin(Some("club")).is_ok());
    }

    #[test]
    fn test_unconfigured_rejects_everything() {
        let creds = AdminCredentials::default();
        assert!(!creds.is_configured());
        assert_eq!(creds.authenticate(""), None);
    }

    #[test]
    fn test_change_admin_password() {
        let creds = AdminCredentials::new("club", "root");
        let updated = creds.change_admin_password("club", "newpass").unwrap();
        assert_eq!(updated.authenticate("newpass"), Some(AdminRole::Admin));
        assert_eq!(updated.authenticate("club"), None);

        assert!(creds.change_admin_password("wrong", "x").is_err());
        assert!(creds.change_admin_password("root", "x").is_err());
        assert!(creds.change_admin_password("club", "root").is_err());
        assert!(creds.change_admin_password("club", "  ").is_err());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let creds = AdminCredentials::new("club", "root");
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("club"));
        assert!(rendered.contains("***"));
    }
}
