// Persistence seam for the unit preference
use crate::domain::units::UnitSystem;
use std::sync::Mutex;

pub trait PreferenceStore: Send + Sync {
    /// Load the persisted preference, `None` when nothing was stored yet
    fn load(&self) -> anyhow::Result<Option<UnitSystem>>;

    /// Persist the preference
    fn save(&self, system: UnitSystem) -> anyhow::Result<()>;
}

/// Process-local store used when no preference file is configured
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    value: Mutex<Option<UnitSystem>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> anyhow::Result<Option<UnitSystem>> {
        let value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("preference lock poisoned"))?;
        Ok(*value)
    }

    fn save(&self, system: UnitSystem) -> anyhow::Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("preference lock poisoned"))?;
        *value = Some(system);
        Ok(())
    }
}

/// Resolve the startup preference: persisted value, else `default`.
/// An unreadable store is logged and treated as empty.
pub fn initial_preference(store: &dyn PreferenceStore, default: UnitSystem) -> UnitSystem {
    match store.load() {
        Ok(Some(system)) => system,
        Ok(None) => default,
        Err(e) => {
            tracing::warn!("Ignoring unreadable unit preference: {:#}", e);
            default
        }
    }
}
