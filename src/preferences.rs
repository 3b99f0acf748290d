#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalPreferences;

impl PreferenceStore for LocalPreferences {
    fn load(&self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            LocalStorage::raw().get_item(key).ok().flatten()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    fn save(&mut self, key: &str, value: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if LocalStorage::raw().set_item(key, value).is_err() {
                tracing::warn!("preferences: failed to persist {key}");
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
        }
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    entries: std::collections::BTreeMap<String, String>,
}

#[cfg(test)]
impl MemoryPreferences {
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.save(key, value);
        store
    }
}

#[cfg(test)]
impl PreferenceStore for MemoryPreferences {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}
