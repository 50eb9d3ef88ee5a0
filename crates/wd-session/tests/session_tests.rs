//! Session layer tests: capability matching, driver registry, sessions, element handles.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;
    use wd_session::matcher::{best_match, score};
    use wd_session::*;

    /// Driver that only knows its own name and counts `quit` calls.
    struct NamedDriver {
        name: &'static str,
        quits: Arc<AtomicUsize>,
    }

    impl Driver for NamedDriver {
        fn title(&self) -> DriverResult<String> {
            Ok(self.name.to_string())
        }

        fn quit(&self) -> DriverResult<()> {
            self.quits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn named(name: &'static str) -> impl Fn() -> Result<Box<dyn Driver>, DriverError> + Send + Sync {
        move || {
            Ok(Box::new(NamedDriver { name, quits: Arc::new(AtomicUsize::new(0)) }) as Box<dyn Driver>)
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Matcher
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn score_counts_each_criterion() {
        let registered = Capabilities::new("firefox")
            .with_version("10")
            .with_platform(Platform::Linux)
            .with_javascript(true);
        let desired = Capabilities::new("FireFox")
            .with_version("10")
            .with_platform(Platform::Unix)
            .with_javascript(true);
        assert_eq!(score(&registered, &desired), 4);
    }

    #[test]
    fn score_ignores_absent_browser_and_version() {
        let registered = Capabilities::default();
        let desired = Capabilities::new("chrome").with_version("1");
        // Only the wildcard platform and unspecified JS preference score.
        assert_eq!(score(&registered, &desired), 2);
    }

    #[test]
    fn tie_goes_to_first_registered() {
        let a = Capabilities::new("chrome").with_platform(Platform::Any);
        let b = Capabilities::new("chrome").with_platform(Platform::Any);
        let desired = Capabilities::new("chrome");
        assert_eq!(best_match([&a, &b], &desired), Some(0));
    }

    #[test]
    fn higher_score_beats_earlier_registration() {
        let a = Capabilities::new("chrome").with_platform(Platform::Any);
        let b = Capabilities::new("chrome").with_version("20").with_platform(Platform::Any);
        let desired = Capabilities::new("chrome").with_version("20");
        assert_eq!(best_match([&a, &b], &desired), Some(1));
    }

    #[test]
    fn zero_score_is_no_match() {
        let registered = Capabilities::new("internet explorer")
            .with_platform(Platform::Windows)
            .with_javascript(false);
        let desired = Capabilities::new("safari")
            .with_platform(Platform::Linux)
            .with_javascript(true);
        assert_eq!(score(&registered, &desired), 0);
        assert_eq!(best_match([&registered], &desired), None);
        assert_eq!(best_match(std::iter::empty(), &desired), None);
    }

    #[test]
    fn javascript_flag_compares_against_desired() {
        let with_js = Capabilities::default().with_platform(Platform::Windows).with_javascript(true);
        let without_js =
            Capabilities::default().with_platform(Platform::Windows).with_javascript(false);
        let desired = Capabilities::default().with_platform(Platform::Linux).with_javascript(false);
        assert_eq!(score(&with_js, &desired), 0);
        assert_eq!(score(&without_js, &desired), 1);
        assert_eq!(best_match([&with_js, &without_js], &desired), Some(1));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Driver registry
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn create_driver_uses_best_mapping() {
        let registry = DriverRegistry::new();
        registry.register_constructor(Capabilities::new("chrome"), "a", named("A"));
        registry.register_constructor(Capabilities::new("chrome"), "b", named("B"));

        let (driver, driver_type) = registry.create_driver(&Capabilities::new("chrome")).unwrap();
        assert_eq!(driver_type, "a");
        assert_eq!(driver.title().unwrap(), "A");
    }

    #[test]
    fn create_driver_reports_no_match() {
        let registry = DriverRegistry::new();
        let desired = Capabilities::new("chrome").with_javascript(true);
        let err = registry.create_driver(&desired).err().unwrap();
        assert!(matches!(err, DriverInstantiationError::NoMatch(_)));
    }

    #[test]
    fn create_driver_wraps_constructor_failure() {
        let registry = DriverRegistry::new();
        registry.register_constructor(Capabilities::chrome(), "broken", || {
            Err(DriverError::unknown("browser binary missing"))
        });
        let err = registry.create_driver(&Capabilities::chrome()).err().unwrap();
        assert_eq!(
            err,
            DriverInstantiationError::Failed {
                driver_type: "broken".into(),
                reason: "browser binary missing".into(),
            }
        );
    }

    #[test]
    fn create_driver_wraps_constructor_panic() {
        let registry = DriverRegistry::new();
        registry.register_constructor(Capabilities::chrome(), "panicky", || panic!("no display"));
        let err = registry.create_driver(&Capabilities::chrome()).err().unwrap();
        match err {
            DriverInstantiationError::Failed { reason, .. } => assert_eq!(reason, "no display"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn register_by_name_uses_catalog() {
        let registry = DriverRegistry::new();
        registry.add_driver_type("fake", named("F"));
        assert!(registry.has_driver_type("fake"));
        registry.register(Capabilities::firefox(), "fake").unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.registrations()[0].1, "fake");
    }

    #[test]
    fn register_unknown_type_notifies_listeners() {
        let registry = DriverRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        registry.on_registration_failed(move |failure| sink.lock().push(failure.clone()));

        let err = registry.register(Capabilities::chrome(), "com.example.Missing").unwrap_err();
        assert_eq!(err.driver_type, "com.example.Missing");
        assert!(registry.is_empty());

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].driver_type, "com.example.Missing");
        assert!(seen[0].to_string().starts_with("Could not register driver with type"));
    }

    #[test]
    fn register_defaults_skips_foreign_platforms() {
        let registry = DriverRegistry::new();
        registry.add_driver_type("here", named("H"));
        registry.add_driver_type("elsewhere", named("E"));
        let foreign = if Platform::current() == Platform::Android {
            Platform::Windows
        } else {
            Platform::Android
        };
        registry.register_defaults(&[
            (Capabilities::new("here").with_platform(Platform::Any), "here"),
            (Capabilities::new("elsewhere").with_platform(foreign), "elsewhere"),
        ]);
        let types: Vec<_> = registry.registrations().into_iter().map(|(_, t)| t).collect();
        assert_eq!(types, vec!["here".to_string()]);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Sessions
    // ─────────────────────────────────────────────────────────────────────

    fn registry_with_counter(quits: Arc<AtomicUsize>) -> SessionRegistry {
        let drivers = DriverRegistry::new();
        drivers.register_constructor(Capabilities::chrome(), "counting", move || {
            Ok(Box::new(NamedDriver { name: "C", quits: Arc::clone(&quits) }) as Box<dyn Driver>)
        });
        SessionRegistry::new(Arc::new(drivers))
    }

    #[test]
    fn create_and_lookup_session() {
        let sessions = registry_with_counter(Arc::new(AtomicUsize::new(0)));
        let id = sessions.create_session(&Capabilities::new("chrome")).unwrap();

        let session = sessions.get_session(&id).unwrap();
        assert_eq!(session.id(), &id);
        assert_eq!(session.driver_type(), "counting");
        assert_eq!(session.capabilities().browser_name.as_deref(), Some("chrome"));
        assert_eq!(session.capabilities().platform, Some(Platform::current()));
        assert_eq!(session.capabilities().javascript_enabled, Some(true));
        assert!(sessions.get_session(&SessionId::new("nope")).is_none());
    }

    #[test]
    fn session_ids_are_unique() {
        let sessions = registry_with_counter(Arc::new(AtomicUsize::new(0)));
        let a = sessions.create_session(&Capabilities::chrome()).unwrap();
        let b = sessions.create_session(&Capabilities::chrome()).unwrap();
        assert_ne!(a, b);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions.list().len(), 2);
    }

    #[test]
    fn remove_session_forgets_it() {
        let sessions = registry_with_counter(Arc::new(AtomicUsize::new(0)));
        let id = sessions.create_session(&Capabilities::chrome()).unwrap();
        assert!(sessions.remove_session(&id).is_some());
        assert!(sessions.remove_session(&id).is_none());
        assert!(sessions.is_empty());
    }

    #[test]
    fn quit_all_quits_every_driver() {
        let quits = Arc::new(AtomicUsize::new(0));
        let sessions = registry_with_counter(Arc::clone(&quits));
        sessions.create_session(&Capabilities::chrome()).unwrap();
        sessions.create_session(&Capabilities::chrome()).unwrap();
        sessions.quit_all();
        assert_eq!(quits.load(Ordering::SeqCst), 2);
        assert!(sessions.is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Element repository
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn same_element_gets_distinct_handles() {
        let repo = ElementRepository::new();
        let element = ElementRef::new("native-1");
        let first = repo.add(element.clone());
        let second = repo.add(element.clone());
        assert_ne!(first, second);
        assert_eq!(repo.get(&first), Some(element.clone()));
        assert_eq!(repo.get(&second), Some(element));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn unknown_handle_is_absent() {
        let repo = ElementRepository::new();
        assert!(repo.get("missing").is_none());
        assert!(!repo.contains("missing"));
        assert!(repo.is_empty());
    }

    #[test]
    fn concurrent_adds_never_collide() {
        let repo = Arc::new(ElementRepository::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    (0..50).map(|i| repo.add(ElementRef::new(format!("{t}-{i}")))).collect::<Vec<_>>()
                })
            })
            .collect();
        let mut all: Vec<String> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 400);
        assert_eq!(repo.len(), 400);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Locators
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn locator_strategies() {
        assert_eq!(Locator::from_strategy("css selector", "#x"), Some(Locator::CssSelector("#x".into())));
        assert_eq!(Locator::from_strategy("link text", "Home"), Some(Locator::LinkText("Home".into())));
        assert_eq!(Locator::from_strategy("shadow", "x"), None);
        assert_eq!(Locator::XPath("//a".into()).strategy(), "xpath");
    }
}
