//! Safety allow-list.
//!
//! Apps on this list can never be intervened on, whatever the boundary set
//! says. The list is fixed at engine construction and is checked on every
//! decision instead of being filtered out of the boundary set when it is
//! written, so a corrupted or hand-edited boundary set cannot defeat it.

use std::collections::HashSet;

use boundary_types::AppId;

/// OS chrome. Window events from these are not user-relevant at all.
pub const OS_CHROME: &[&str] = &["android", "com.android.systemui"];

/// Critical system apps the user must always be able to reach.
pub const CRITICAL_APPS: &[&str] = &[
    // device settings
    "com.android.settings",
    // phone / dialer
    "com.android.phone",
    "com.android.dialer",
    "com.google.android.dialer",
    // messaging / SMS
    "com.android.messaging",
    "com.google.android.apps.messaging",
    "com.android.mms",
    // contacts
    "com.android.contacts",
    // system shell
    "android",
    "com.android.systemui",
    // default launchers
    "com.google.android.apps.nexuslauncher",
    "com.android.launcher3",
    "com.android.launcher",
];

pub fn is_os_chrome(app: &AppId) -> bool {
    OS_CHROME.contains(&app.as_str())
}

#[derive(Clone, Debug)]
pub struct SafetyAllowList {
    host: AppId,
    apps: HashSet<AppId>,
}

/// Which safety check matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protection {
    /// The host application itself.
    Host,
    /// A catalogued critical app.
    Critical,
}

impl SafetyAllowList {
    /// Build the list for a host. The host is included in the set as well as
    /// being checked on its own.
    pub fn new(host: AppId) -> Self {
        let mut apps: HashSet<AppId> = CRITICAL_APPS.iter().map(|id| AppId::from(*id)).collect();
        apps.insert(host.clone());
        Self { host, apps }
    }

    pub fn host(&self) -> &AppId {
        &self.host
    }

    pub fn contains(&self, app: &AppId) -> bool {
        self.apps.contains(app)
    }

    pub fn protection(&self, app: &AppId) -> Option<Protection> {
        if *app == self.host {
            Some(Protection::Host)
        } else if self.apps.contains(app) {
            Some(Protection::Critical)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_is_protected_twice() {
        let list = SafetyAllowList::new(AppId::new("com.example.host"));
        assert!(list.contains(&AppId::new("com.example.host")));
        assert_eq!(
            list.protection(&AppId::new("com.example.host")),
            Some(Protection::Host)
        );
    }

    #[test]
    fn catalogue_is_covered() {
        let list = SafetyAllowList::new(AppId::new("com.example.host"));
        for id in CRITICAL_APPS {
            assert_eq!(list.protection(&AppId::from(*id)), Some(Protection::Critical));
        }
        assert_eq!(list.len(), CRITICAL_APPS.len() + 1);
    }

    #[test]
    fn ordinary_app_is_not_protected() {
        let list = SafetyAllowList::new(AppId::new("com.example.host"));
        assert_eq!(list.protection(&AppId::new("com.social.app")), None);
    }

    #[test]
    fn os_chrome_is_exact_match() {
        assert!(is_os_chrome(&AppId::new("android")));
        assert!(is_os_chrome(&AppId::new("com.android.systemui")));
        assert!(!is_os_chrome(&AppId::new("com.android.systemui.plugin")));
    }
}
