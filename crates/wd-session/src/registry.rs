//! DriverRegistry: the catalog of driver types and the capability mappings
//! used to pick one for a new session.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, error, info};
use wd_protocol::{Capabilities, DriverError, Platform};

use crate::driver::Driver;
use crate::matcher;

/// Zero-argument factory producing a fresh driver instance.
pub type DriverConstructor = Arc<dyn Fn() -> Result<Box<dyn Driver>, DriverError> + Send + Sync>;

type FailureListener = Arc<dyn Fn(&RegistrationFailure) + Send + Sync>;

/// A driver mapping that could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not register driver with type '{driver_type}'.\nThe reason given was:\n{reason}")]
pub struct RegistrationFailure {
    pub driver_type: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverInstantiationError {
    #[error("No driver registered that matches the desired capabilities {0}")]
    NoMatch(String),
    #[error("Driver '{driver_type}' could not be created: {reason}")]
    Failed { driver_type: String, reason: String },
}

struct Registration {
    capabilities: Capabilities,
    driver_type: String,
    constructor: DriverConstructor,
}

/// Holds driver constructors by type name and an ordered list of
/// capability mappings onto them.
///
/// Registration order matters: when two mappings score equally for a
/// request, the earlier one wins.
#[derive(Default)]
pub struct DriverRegistry {
    catalog: RwLock<HashMap<String, DriverConstructor>>,
    registrations: RwLock<Vec<Registration>>,
    failure_listeners: RwLock<Vec<FailureListener>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a driver type known by name. Mappings refer to types by this name.
    pub fn add_driver_type<F>(&self, driver_type: impl Into<String>, constructor: F)
    where
        F: Fn() -> Result<Box<dyn Driver>, DriverError> + Send + Sync + 'static,
    {
        let driver_type = driver_type.into();
        debug!("Driver type available: {driver_type}");
        self.catalog.write().insert(driver_type, Arc::new(constructor));
    }

    pub fn has_driver_type(&self, driver_type: &str) -> bool {
        self.catalog.read().contains_key(driver_type)
    }

    /// Map `capabilities` onto a known driver type.
    ///
    /// An unknown type is reported to every failure listener and logged.
    pub fn register(
        &self,
        capabilities: Capabilities,
        driver_type: &str,
    ) -> Result<(), RegistrationFailure> {
        let constructor = self.catalog.read().get(driver_type).cloned();
        match constructor {
            Some(constructor) => {
                self.push(capabilities, driver_type.to_string(), constructor);
                Ok(())
            }
            None => {
                let failure = RegistrationFailure {
                    driver_type: driver_type.to_string(),
                    reason: format!("No driver type named '{driver_type}' is available"),
                };
                self.report_failure(&failure);
                Err(failure)
            }
        }
    }

    /// Map `capabilities` directly onto a constructor.
    pub fn register_constructor<F>(
        &self,
        capabilities: Capabilities,
        driver_type: impl Into<String>,
        constructor: F,
    ) where
        F: Fn() -> Result<Box<dyn Driver>, DriverError> + Send + Sync + 'static,
    {
        self.push(capabilities, driver_type.into(), Arc::new(constructor));
    }

    /// Register each default mapping whose platform fits the current platform.
    pub fn register_defaults(&self, defaults: &[(Capabilities, &str)]) {
        let current = Platform::current();
        for (capabilities, driver_type) in defaults {
            let fits = capabilities
                .platform
                .is_none_or(|platform| current.is_platform_type(platform));
            if !fits {
                debug!("Skipping driver '{driver_type}': not available on {current}");
                continue;
            }
            // Failures are already reported to listeners.
            let _ = self.register(capabilities.clone(), driver_type);
        }
    }

    /// Subscribe to registration failures.
    pub fn on_registration_failed<F>(&self, listener: F)
    where
        F: Fn(&RegistrationFailure) + Send + Sync + 'static,
    {
        self.failure_listeners.write().push(Arc::new(listener));
    }

    /// Registered mappings in registration order.
    pub fn registrations(&self) -> Vec<(Capabilities, String)> {
        self.registrations
            .read()
            .iter()
            .map(|r| (r.capabilities.clone(), r.driver_type.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }

    /// Driver type and constructor that best fit `desired`.
    pub fn best_match(&self, desired: &Capabilities) -> Option<(String, DriverConstructor)> {
        let registrations = self.registrations.read();
        let index = matcher::best_match(registrations.iter().map(|r| &r.capabilities), desired)?;
        let chosen = &registrations[index];
        Some((chosen.driver_type.clone(), Arc::clone(&chosen.constructor)))
    }

    /// Create a driver for `desired`. Returns the driver and its type name.
    ///
    /// The constructor runs outside every lock. A constructor error or panic
    /// becomes `DriverInstantiationError::Failed`.
    pub fn create_driver(
        &self,
        desired: &Capabilities,
    ) -> Result<(Box<dyn Driver>, String), DriverInstantiationError> {
        let (driver_type, constructor) = self
            .best_match(desired)
            .ok_or_else(|| DriverInstantiationError::NoMatch(desired.to_string()))?;

        info!("Creating driver '{driver_type}' for {desired}");
        match catch_unwind(AssertUnwindSafe(|| constructor())) {
            Ok(Ok(driver)) => Ok((driver, driver_type)),
            Ok(Err(e)) => Err(DriverInstantiationError::Failed { driver_type, reason: e.message }),
            Err(panic) => Err(DriverInstantiationError::Failed {
                driver_type,
                reason: panic_message(panic.as_ref()),
            }),
        }
    }

    fn push(&self, capabilities: Capabilities, driver_type: String, constructor: DriverConstructor) {
        info!("Registered driver '{driver_type}' for {capabilities}");
        self.registrations.write().push(Registration { capabilities, driver_type, constructor });
    }

    fn report_failure(&self, failure: &RegistrationFailure) {
        error!("{failure}");
        let listeners = self.failure_listeners.read().clone();
        for listener in listeners {
            listener(failure);
        }
    }
}

/// Best-effort text of a caught panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "driver constructor panicked".to_string()
    }
}
