use std::collections::HashMap;

use sysinfo::Users;

pub const UNKNOWN_USER: &str = "unknown";
pub const MISSING_UID: &str = "n/a";

/// Uid → account name table, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    names: HashMap<u32, String>,
}

impl UserTable {
    pub fn load() -> Self {
        let users = Users::new_with_refreshed_list();
        let names = users
            .list()
            .iter()
            .map(|user| (**user.id(), user.name().to_string()))
            .collect();
        let table = UserTable { names };

        #[cfg(feature = "perf-tracing")]
        tracing::debug!(accounts = table.len(), "user table loaded");

        table
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        UserTable {
            names: entries
                .into_iter()
                .map(|(uid, name)| (uid, name.into()))
                .collect(),
        }
    }

    pub fn resolve(&self, uid: Option<u32>) -> &str {
        match uid {
            Some(uid) => self
                .names
                .get(&uid)
                .map(String::as_str)
                .unwrap_or(UNKNOWN_USER),
            None => MISSING_UID,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
