// Theme store: light/dark preference mirrored to a key-value backend

use crate::codec::{self, THEME_KEY};
use crate::events::{SubscriptionId, Subscribers, ThemeChanged};
use crate::kv::KeyValueStore;
use crate::models::Theme;
use tracing::{debug, warn};

pub struct ThemeStore<K: KeyValueStore> {
    kv: K,
    theme: Theme,
    subscribers: Subscribers<ThemeChanged>,
}

impl<K: KeyValueStore> ThemeStore<K> {
    /// Load the persisted theme, falling back to `Theme::Light`
    pub fn open(kv: K) -> Self {
        let theme = match kv.get(THEME_KEY) {
            Ok(Some(raw)) => codec::decode_theme(&raw).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = ?e, "Failed to read stored theme, using default");
                Theme::default()
            }
        };
        debug!(%theme, "Opened theme store");

        Self {
            kv,
            theme,
            subscribers: Subscribers::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch light/dark, persist, and return the new theme
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        debug!(theme = %self.theme, "toggle_theme");

        if let Err(e) = self.kv.set(THEME_KEY, codec::encode_theme(self.theme)) {
            warn!(error = ?e, "Failed to persist theme");
        }

        self.subscribers.notify(&ThemeChanged(self.theme));
        self.theme
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ThemeChanged) + Send + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}
