// admin.rs
//
// Single home of the admin capability. Every admin decision in the
// service goes through `AdminRegistry::is_admin`; the allow-list is
// never consulted anywhere else.

use std::collections::HashSet;
use std::sync::RwLock;

use crate::identity::Caller;

/// In-process registry of administrator grants, keyed by contact
/// address. Seeded at startup from configuration; grants can be added
/// or revoked at runtime without touching the record store.
#[derive(Debug, Default)]
pub struct AdminRegistry {
    grants: RwLock<HashSet<String>>,
}

impl AdminRegistry {
    pub fn new<I>(addresses: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let grants = addresses
            .into_iter()
            .map(|a| normalize(a.as_ref()))
            .filter(|a| !a.is_empty())
            .collect();
        Self {
            grants: RwLock::new(grants),
        }
    }

    pub fn grant(&self, address: &str) {
        self.grants.write().unwrap().insert(normalize(address));
    }

    pub fn revoke(&self, address: &str) {
        self.grants.write().unwrap().remove(&normalize(address));
    }

    pub fn is_admin(&self, caller: &Caller) -> bool {
        let Some(email) = caller.user().and_then(|u| u.email.as_deref()) else {
            return false;
        };
        self.grants.read().unwrap().contains(&normalize(email))
    }
}

fn normalize(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;

    fn user(id: &str, email: Option<&str>) -> Caller {
        Caller::User(Identity {
            id: id.into(),
            email: email.map(Into::into),
        })
    }

    #[test]
    fn membership_is_case_insensitive() {
        let admins = AdminRegistry::new(["Root@Example.com"]);
        assert!(admins.is_admin(&user("u1", Some("root@example.com"))));
    }

    #[test]
    fn anonymous_and_unlisted_are_not_admins() {
        let admins = AdminRegistry::new(["root@example.com"]);
        assert!(!admins.is_admin(&Caller::Anonymous));
        assert!(!admins.is_admin(&user("u1", Some("other@example.com"))));
        assert!(!admins.is_admin(&user("u1", None)));
    }

    #[test]
    fn grant_and_revoke_take_effect() {
        let admins = AdminRegistry::new(Vec::<String>::new());
        let caller = user("u1", Some("new@example.com"));
        assert!(!admins.is_admin(&caller));

        admins.grant("new@example.com");
        assert!(admins.is_admin(&caller));

        admins.revoke("new@example.com");
        assert!(!admins.is_admin(&caller));
    }
}
