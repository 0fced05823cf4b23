//! Profile service.
//!
//! The profile is a singleton per user rather than a list, so it carries
//! its own small sync loop instead of a [`crate::sync::SyncCore`]: hydrate
//! from cache, poll the remote row, and push saves as query-then-patch
//! upserts. A `None` from the remote is ignored the same way empty list
//! emissions are.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::config::RemoteConfig;
use crate::error::{Error, Result};
use crate::identity::UserId;
use crate::models::Profile;
use crate::remote::RemoteStore;
use crate::store::{keys, EntityCache};
use crate::util::normalize_text_option;

struct ProfileSession {
    user: Option<UserId>,
    poll: Option<JoinHandle<()>>,
}

/// The user's profile and session flag.
pub struct ProfileService {
    cache: EntityCache,
    remote: Arc<dyn RemoteStore>,
    config: RemoteConfig,
    profile: Arc<watch::Sender<Option<Profile>>>,
    session: Mutex<ProfileSession>,
    writes: Mutex<Vec<JoinHandle<()>>>,
}

impl ProfileService {
    #[must_use]
    pub fn new(cache: EntityCache, remote: Arc<dyn RemoteStore>, config: RemoteConfig) -> Self {
        let (profile, _) = watch::channel(None);
        Self {
            cache,
            remote,
            config,
            profile: Arc::new(profile),
            session: Mutex::new(ProfileSession {
                user: None,
                poll: None,
            }),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Publish the cached profile, if any.
    pub fn hydrate(&self) {
        if let Some(profile) = self.cache.load_value::<Profile>(keys::PROFILE) {
            self.profile.send_replace(Some(profile));
        }
    }

    /// Start polling the user's profile row. No-op without remote
    /// configuration; idempotent for the same user.
    pub async fn attach(&self, user: UserId) {
        if !self.config.is_configured() {
            tracing::debug!("remote not configured, profile stays local-only");
            return;
        }

        let mut session = self.session.lock().await;
        if session.user.as_ref() == Some(&user) {
            return;
        }
        if let Some(poll) = session.poll.take() {
            poll.abort();
        }
        session.user = Some(user.clone());

        let remote = Arc::clone(&self.remote);
        let cache = self.cache.clone();
        let sender = Arc::clone(&self.profile);
        let interval = self.config.sync_interval;
        session.poll = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match remote.get_profile(&user).await {
                    Ok(profile) => apply(&cache, &sender, profile),
                    Err(error) => tracing::warn!(%error, "profile fetch failed"),
                }
            }
        }));
    }

    /// Apply a remote emission: `Some` replaces the profile, `None` is
    /// ignored so a user without a remote row keeps the cached one.
    pub fn apply_remote(&self, profile: Option<Profile>) {
        apply(&self.cache, &self.profile, profile);
    }

    /// Fetch the profile row once and apply it. Returns `false` when no
    /// user is attached.
    pub async fn refresh(&self) -> Result<bool> {
        let user = self.session.lock().await.user.clone();
        let Some(user) = user else {
            return Ok(false);
        };
        let profile = self.remote.get_profile(&user).await?;
        self.apply_remote(profile);
        Ok(true)
    }

    #[must_use]
    pub fn current(&self) -> Option<Profile> {
        self.profile.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Profile>> {
        self.profile.subscribe()
    }

    /// Store the profile locally and queue the singleton remote upsert.
    /// A blank avatar URL is normalized to absent.
    pub async fn save(&self, profile: Profile) -> Profile {
        let profile = Profile {
            name: profile.name.trim().to_string(),
            email: profile.email.trim().to_string(),
            avatar_url: normalize_text_option(profile.avatar_url),
        };

        if let Err(error) = self.cache.save_value(keys::PROFILE, &profile) {
            tracing::warn!(%error, "failed to persist profile");
        }
        self.profile.send_replace(Some(profile.clone()));
        self.queue_upsert(profile.clone()).await;
        profile
    }

    /// Mark the session signed in under the given email, updating the
    /// profile to match. The email must be non-empty.
    pub async fn sign_in(&self, email: &str, name: Option<&str>) -> Result<Profile> {
        let email = email.trim();
        if email.is_empty() {
            return Err(Error::InvalidInput("email must not be empty".to_string()));
        }

        let mut profile = self.current().unwrap_or_default();
        profile.email = email.to_string();
        if let Some(name) = name {
            profile.name = name.trim().to_string();
        }
        let profile = self.save(profile).await;

        self.cache.store().set(keys::SESSION, "true")?;
        tracing::info!("signed in");
        Ok(profile)
    }

    /// Clear the signed-in flag. The cached profile stays.
    pub fn sign_out(&self) -> Result<()> {
        self.cache.store().remove(keys::SESSION)?;
        tracing::info!("signed out");
        Ok(())
    }

    /// Whether a sign-in flag is set.
    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.cache
            .store()
            .get(keys::SESSION)
            .ok()
            .flatten()
            .as_deref()
            == Some("true")
    }

    /// Wait for queued remote writes.
    pub async fn flush(&self) {
        let handles: Vec<_> = self.writes.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(error) = handle.await {
                tracing::warn!(%error, "profile write task failed");
            }
        }
    }

    async fn queue_upsert(&self, profile: Profile) {
        let user = self.session.lock().await.user.clone();
        let Some(user) = user else {
            return;
        };

        let remote = Arc::clone(&self.remote);
        let handle = tokio::spawn(async move {
            if let Err(error) = remote.upsert_profile(&user, &profile).await {
                tracing::warn!(%error, "profile upsert dropped");
            }
        });

        let mut writes = self.writes.lock().await;
        writes.retain(|write| !write.is_finished());
        writes.push(handle);
    }
}

fn apply(cache: &EntityCache, sender: &watch::Sender<Option<Profile>>, profile: Option<Profile>) {
    let Some(profile) = profile else {
        tracing::debug!("ignoring empty profile emission");
        return;
    };
    if let Err(error) = cache.save_value(keys::PROFILE, &profile) {
        tracing::warn!(%error, "failed to persist profile");
    }
    sender.send_replace(Some(profile));
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use crate::remote::MemoryRemoteStore;
    use crate::store::MemoryStateStore;

    use super::*;

    fn cache() -> EntityCache {
        EntityCache::new(Arc::new(MemoryStateStore::new()))
    }

    fn configured() -> RemoteConfig {
        RemoteConfig::new("https://workspace.example.com")
            .with_sync_interval(Duration::from_secs(3600))
    }

    fn owner() -> UserId {
        UserId::new("user-test")
    }

    fn profile(name: &str, email: &str) -> Profile {
        Profile {
            name: name.to_string(),
            email: email.to_string(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_hydrate_publishes_cached_profile() {
        let cache = cache();
        cache
            .save_value(keys::PROFILE, &profile("Wren", "wren@example.com"))
            .unwrap();
        let service =
            ProfileService::new(cache, Arc::new(MemoryRemoteStore::new()), RemoteConfig::default());

        assert_eq!(service.current(), None);
        service.hydrate();
        assert_eq!(service.current().map(|p| p.name), Some("Wren".to_string()));
    }

    #[tokio::test]
    async fn test_empty_emission_keeps_cached_profile() {
        let cache = cache();
        cache
            .save_value(keys::PROFILE, &profile("Wren", "wren@example.com"))
            .unwrap();
        let service =
            ProfileService::new(cache, Arc::new(MemoryRemoteStore::new()), RemoteConfig::default());
        service.hydrate();

        service.apply_remote(None);
        assert!(service.current().is_some());

        service.apply_remote(Some(profile("Remote", "remote@example.com")));
        assert_eq!(service.current().map(|p| p.name), Some("Remote".to_string()));
    }

    #[tokio::test]
    async fn test_save_normalizes_avatar() {
        let service = ProfileService::new(
            cache(),
            Arc::new(MemoryRemoteStore::new()),
            RemoteConfig::default(),
        );

        let saved = service
            .save(Profile {
                name: "  Wren ".to_string(),
                email: "wren@example.com".to_string(),
                avatar_url: Some("   ".to_string()),
            })
            .await;

        assert_eq!(saved.name, "Wren");
        assert_eq!(saved.avatar_url, None);
        assert_eq!(service.current(), Some(saved));
    }

    #[tokio::test(start_paused = true)]
    async fn test_attach_pulls_remote_profile() {
        let cache = cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        remote
            .upsert_profile(&owner(), &profile("Remote", "remote@example.com"))
            .await
            .unwrap();
        let service = ProfileService::new(cache, Arc::clone(&remote) as Arc<dyn RemoteStore>, configured());

        service.attach(owner()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert_eq!(service.current().map(|p| p.name), Some("Remote".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_pushes_upsert_when_attached() {
        let remote = Arc::new(MemoryRemoteStore::new());
        let service = ProfileService::new(
            cache(),
            Arc::clone(&remote) as Arc<dyn RemoteStore>,
            configured(),
        );
        service.attach(owner()).await;

        service.save(profile("Wren", "wren@example.com")).await;
        service.flush().await;

        let stored = remote.get_profile(&owner()).await.unwrap();
        assert_eq!(stored.map(|p| p.email), Some("wren@example.com".to_string()));
    }

    #[tokio::test]
    async fn test_sign_in_requires_email_and_sets_flag() {
        let service = ProfileService::new(
            cache(),
            Arc::new(MemoryRemoteStore::new()),
            RemoteConfig::default(),
        );

        assert!(service.sign_in("   ", None).await.is_err());
        assert!(!service.signed_in());

        let signed = service.sign_in("wren@example.com", Some("Wren")).await.unwrap();
        assert_eq!(signed.email, "wren@example.com");
        assert!(service.signed_in());
    }

    #[tokio::test]
    async fn test_sign_out_keeps_profile() {
        let service = ProfileService::new(
            cache(),
            Arc::new(MemoryRemoteStore::new()),
            RemoteConfig::default(),
        );
        service.sign_in("wren@example.com", Some("Wren")).await.unwrap();

        service.sign_out().unwrap();
        assert!(!service.signed_in());
        assert!(service.current().is_some());
    }
}
