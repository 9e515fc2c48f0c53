//! In-memory browser session store.
//!
//! Each browser carries an opaque token in a cookie; the login state and the
//! pending flash notices live here, keyed by that token. Entries expire after
//! an idle period that is extended on every access.
//!
//! An entry is only stored once there is something to keep (a login or a
//! queued flash), and the map is capped at `DEFAULT_MAX_SESSIONS` entries.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{Flash, Session};

/// Upper bound on stored sessions before anonymous entries are evicted
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// A single stored session entry.
pub struct SessionEntry {
    pub session: Session,
    pub flashes: Vec<Flash>,
    pub expires_at: DateTime<Utc>,
}

impl SessionEntry {
    fn new(ttl: Duration) -> Self {
        Self {
            session: Session::anonymous(),
            flashes: Vec::new(),
            expires_at: Utc::now() + ttl,
        }
    }
}

/// Thread-safe session map, keyed by cookie token.
pub struct SessionStore {
    entries: DashMap<String, SessionEntry>,
    ttl: Duration,
    max_entries: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self::with_limit(ttl, DEFAULT_MAX_SESSIONS)
    }

    pub fn with_limit(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A fresh token. Nothing is stored until the session holds state.
    pub fn new_token() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Start a stored anonymous session and return its token
    #[cfg(test)]
    pub(crate) fn create(&self) -> String {
        let token = Self::new_token();
        self.make_room();
        self.entries.insert(token.clone(), SessionEntry::new(self.ttl));
        token
    }

    /// Keep the map under `max_entries` before a new entry is inserted.
    /// Expired entries go first, then the anonymous ones closest to expiry.
    /// Logged-in sessions are never evicted.
    fn make_room(&self) {
        if self.entries.len() < self.max_entries {
            return;
        }
        self.purge_expired();
        if self.entries.len() < self.max_entries {
            return;
        }

        let mut anonymous: Vec<(DateTime<Utc>, String)> = self
            .entries
            .iter()
            .filter(|e| !e.session.logged_in)
            .map(|e| (e.expires_at, e.key().clone()))
            .collect();
        anonymous.sort();

        let excess = self.entries.len() + 1 - self.max_entries;
        for (_, token) in anonymous.into_iter().take(excess) {
            self.entries.remove(&token);
        }
        log::debug!("[SESSION] Evicted anonymous sessions, {} left", self.entries.len());
    }

    fn ensure_entry(&self, token: &str) {
        if !self.entries.contains_key(token) {
            self.make_room();
            self.entries
                .entry(token.to_string())
                .or_insert_with(|| SessionEntry::new(self.ttl));
        }
    }

    /// Validate a token and extend its expiry. Expired entries are dropped.
    pub fn touch(&self, token: &str) -> bool {
        let now = Utc::now();
        let live = match self.entries.get_mut(token) {
            Some(mut entry) if entry.expires_at > now => {
                entry.expires_at = now + self.ttl;
                true
            }
            Some(_) => false,
            None => return false,
        };

        if !live {
            self.entries.remove(token);
            log::debug!("[SESSION] Dropped expired session");
        }
        live
    }

    /// Clone the session state (anonymous if the token is unknown)
    pub fn get(&self, token: &str) -> Session {
        self.entries
            .get(token)
            .map(|e| e.session.clone())
            .unwrap_or_default()
    }

    /// Mutate the session in place and return the closure's result.
    /// Unknown tokens get a fresh entry first.
    pub fn update<F, R>(&self, token: &str, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        self.ensure_entry(token);
        let mut entry = self
            .entries
            .entry(token.to_string())
            .or_insert_with(|| SessionEntry::new(self.ttl));
        f(&mut entry.session)
    }

    /// Queue a flash notice for the next rendered page
    pub fn push_flash(&self, token: &str, flash: Flash) {
        self.ensure_entry(token);
        let mut entry = self
            .entries
            .entry(token.to_string())
            .or_insert_with(|| SessionEntry::new(self.ttl));
        entry.flashes.push(flash);
    }

    /// Remove and return all queued flash notices
    pub fn take_flashes(&self, token: &str) -> Vec<Flash> {
        self.entries
            .get_mut(token)
            .map(|mut e| std::mem::take(&mut e.flashes))
            .unwrap_or_default()
    }

    /// Move the state of `token` to a newly issued token and forget the old
    /// one. Used on login so a token seen before authentication stops working.
    pub fn rotate(&self, token: &str) -> String {
        let new_token = Self::new_token();
        let mut entry = match self.entries.remove(token) {
            Some((_, entry)) => entry,
            None => {
                self.make_room();
                SessionEntry::new(self.ttl)
            }
        };
        entry.expires_at = Utc::now() + self.ttl;
        self.entries.insert(new_token.clone(), entry);
        new_token
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            log::debug!("[SESSION] Purged {} expired sessions", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn expire_now(&self, token: &str) {
        if let Some(mut entry) = self.entries.get_mut(token) {
            entry.expires_at = Utc::now() - Duration::seconds(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Duration::hours(24))
    }

    #[test]
    fn test_new_session_is_anonymous() {
        let store = store();
        let token = store.create();
        assert!(store.touch(&token));
        assert_eq!(store.get(&token), Session::anonymous());
    }

    #[test]
    fn test_unknown_token() {
        let store = store();
        assert!(!store.touch("not-a-token"));
        assert_eq!(store.get("not-a-token"), Session::anonymous());
        assert!(store.take_flashes("not-a-token").is_empty());
    }

    #[test]
    fn test_update_persists() {
        let store = store();
        let token = store.create();
        store.update(&token, |s| {
            s.logged_in = true;
            s.username = Some("izuko".to_string());
        });
        assert_eq!(store.get(&token).current_user(), Some("izuko"));
    }

    #[test]
    fn test_flashes_are_one_shot() {
        let store = store();
        let token = store.create();
        store.push_flash(&token, Flash::success("one"));
        store.push_flash(&token, Flash::info("two"));

        let flashes = store.take_flashes(&token);
        assert_eq!(flashes, vec![Flash::success("one"), Flash::info("two")]);
        assert!(store.take_flashes(&token).is_empty());
    }

    #[test]
    fn test_expired_session_is_dropped() {
        let store = store();
        let token = store.create();
        store.update(&token, |s| s.logged_in = true);

        store.expire_now(&token);
        assert!(!store.touch(&token));
        assert_eq!(store.get(&token), Session::anonymous());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_purge_expired() {
        let store = store();
        let stale = store.create();
        let _fresh = store.create();
        store.expire_now(&stale);

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_lookups_do_not_store() {
        let store = store();
        let token = SessionStore::new_token();
        assert!(!store.touch(&token));
        assert_eq!(store.get(&token), Session::anonymous());
        assert!(store.take_flashes(&token).is_empty());
        assert!(!store.contains(&token));
        assert_eq!(store.len(), 0);

        store.push_flash(&token, Flash::danger("stored"));
        assert!(store.contains(&token));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_map_stays_bounded_and_keeps_logged_in() {
        let store = SessionStore::with_limit(Duration::hours(24), 3);
        let user = store.create();
        store.update(&user, |s| {
            s.logged_in = true;
            s.username = Some("izuko".to_string());
        });

        for _ in 0..50 {
            store.push_flash(&SessionStore::new_token(), Flash::danger("login required"));
            assert!(store.len() <= 3);
        }
        assert!(store.get(&user).logged_in);
    }

    #[test]
    fn test_expired_entries_are_evicted_first() {
        let store = SessionStore::with_limit(Duration::hours(24), 2);
        let stale = store.create();
        let fresh = store.create();
        store.expire_now(&stale);

        store.push_flash(&SessionStore::new_token(), Flash::info("new"));
        assert_eq!(store.len(), 2);
        assert!(!store.contains(&stale));
        assert!(store.contains(&fresh));
    }

    #[test]
    fn test_rotate_moves_state() {
        let store = store();
        let old = store.create();
        store.update(&old, |s| s.logged_in = true);
        store.push_flash(&old, Flash::success("welcome"));

        let new = store.rotate(&old);
        assert_ne!(old, new);
        assert!(!store.touch(&old));
        assert!(store.get(&new).logged_in);
        assert_eq!(store.take_flashes(&new), vec![Flash::success("welcome")]);
    }
}
