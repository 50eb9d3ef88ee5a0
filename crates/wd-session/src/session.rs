//! SessionRegistry: live driver sessions keyed by session id.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};
use uuid::Uuid;
use wd_protocol::{Capabilities, Platform, SessionId};

use crate::driver::Driver;
use crate::elements::ElementRepository;
use crate::registry::{DriverInstantiationError, DriverRegistry};

/// One live driver plus the state scoped to it.
pub struct DriverSession {
    id: SessionId,
    driver_type: String,
    driver: Box<dyn Driver>,
    capabilities: Capabilities,
    elements: ElementRepository,
}

impl DriverSession {
    /// Wrap a freshly created driver. Actual capabilities are whatever the
    /// driver reports, falling back to the desired browser and version on
    /// the current platform with JavaScript enabled.
    pub fn new(
        id: SessionId,
        driver_type: impl Into<String>,
        driver: Box<dyn Driver>,
        desired: &Capabilities,
    ) -> Self {
        let capabilities = driver.capabilities().unwrap_or_else(|| Capabilities {
            browser_name: desired.browser_name.clone(),
            version: desired.version.clone(),
            platform: Some(Platform::current()),
            javascript_enabled: Some(true),
            extra: Default::default(),
        });
        Self {
            id,
            driver_type: driver_type.into(),
            driver,
            capabilities,
            elements: ElementRepository::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn driver_type(&self) -> &str {
        &self.driver_type
    }

    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn elements(&self) -> &ElementRepository {
        &self.elements
    }
}

/// All live sessions.
///
/// Drivers are created outside the lock; only the insert and lookups take it.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<DriverSession>>>,
    drivers: Arc<DriverRegistry>,
}

impl SessionRegistry {
    pub fn new(drivers: Arc<DriverRegistry>) -> Self {
        Self { sessions: RwLock::new(HashMap::new()), drivers }
    }

    pub fn drivers(&self) -> &Arc<DriverRegistry> {
        &self.drivers
    }

    /// Start a session whose driver best fits `desired`.
    pub fn create_session(
        &self,
        desired: &Capabilities,
    ) -> Result<SessionId, DriverInstantiationError> {
        let (driver, driver_type) = self.drivers.create_driver(desired)?;
        let id = SessionId::new(Uuid::new_v4().to_string());
        let session = DriverSession::new(id.clone(), driver_type, driver, desired);
        info!("Session {id} started with driver '{}'", session.driver_type());
        self.sessions.write().insert(id.clone(), Arc::new(session));
        Ok(id)
    }

    pub fn get_session(&self, id: &SessionId) -> Option<Arc<DriverSession>> {
        self.sessions.read().get(id).cloned()
    }

    /// Forget a session and return it. The caller decides whether to quit it.
    pub fn remove_session(&self, id: &SessionId) -> Option<Arc<DriverSession>> {
        let removed = self.sessions.write().remove(id);
        if removed.is_some() {
            info!("Session {id} removed");
        }
        removed
    }

    /// Ids and actual capabilities of every live session.
    pub fn list(&self) -> Vec<(SessionId, Capabilities)> {
        let mut sessions: Vec<_> = self
            .sessions
            .read()
            .values()
            .map(|s| (s.id().clone(), s.capabilities().clone()))
            .collect();
        sessions.sort_by(|a, b| a.0.cmp(&b.0));
        sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Remove every session and quit its driver.
    pub fn quit_all(&self) {
        let sessions: Vec<_> = self.sessions.write().drain().map(|(_, s)| s).collect();
        for session in sessions {
            if let Err(e) = session.driver().quit() {
                warn!("Driver for session {} failed to quit: {e}", session.id());
            }
        }
    }
}
