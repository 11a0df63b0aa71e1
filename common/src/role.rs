use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Which side of the marketplace the user is acting as. Not tied to any identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Donor,
    #[default]
    Receiver,
}

/// Screens the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Donate,
    Browse,
    Map,
}

impl Role {
    pub fn toggled(self) -> Role {
        match self {
            Role::Donor => Role::Receiver,
            Role::Receiver => Role::Donor,
        }
    }

    /// The screens visible in this role, in tab order.
    pub fn screens(self) -> &'static [Screen] {
        match self {
            Role::Donor => &[Screen::Donate, Screen::Browse],
            Role::Receiver => &[Screen::Browse, Screen::Map],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Donor => "Donor",
            Role::Receiver => "Receiver",
        }
    }
}

/// Shared cell holding the current role. Cloning shares the cell.
#[derive(Debug, Clone, Default)]
pub struct RoleState {
    inner: Arc<RwLock<Role>>,
}

impl RoleState {
    pub fn new(role: Role) -> Self {
        Self {
            inner: Arc::new(RwLock::new(role)),
        }
    }

    pub fn current(&self) -> Role {
        *self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Flip the role unconditionally and return the new one.
    pub fn toggle(&self) -> Role {
        let mut role = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *role = role.toggled();
        *role
    }
}
