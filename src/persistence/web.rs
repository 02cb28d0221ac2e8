use super::{BEST_SCORE_KEY, BestScoreStore};

/// Best score kept in browser LocalStorage
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl BestScoreStore for LocalStorageStore {
    fn load_best(&self) -> u32 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, best score starts at 0");
            return 0;
        };

        match storage.get_item(BEST_SCORE_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring malformed best score {:?}", value);
                0
            }),
            _ => 0,
        }
    }

    fn save_best(&mut self, best: u32) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(BEST_SCORE_KEY, &best.to_string()).is_err() {
                log::warn!("Failed to save best score");
            }
        }
    }
}
