//! Handler tests: scope resolution, parameter validation and driver calls.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io::Write;
    use std::sync::Arc;

    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use parking_lot::Mutex;
    use serde_json::{Value, json};
    use wd_handlers::*;
    use wd_protocol::{
        BodyParams, COMMANDS, Capabilities, CommandError, DriverError, HttpStatus, LocatorParams,
        SessionId,
    };
    use wd_session::{
        Cookie, Driver, DriverErrorKind, DriverRegistry, DriverResult, ElementRef, FrameTarget,
        Locator, Point, ScriptValue, SessionRegistry, TimeoutKind,
    };

    /// Records every call and serves a tiny fixed page.
    #[derive(Default)]
    struct RecordingDriver {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingDriver {
        fn log(&self, call: impl Into<String>) {
            self.calls.lock().push(call.into());
        }
    }

    impl Driver for RecordingDriver {
        fn navigate_to(&self, url: &str) -> DriverResult<()> {
            self.log(format!("navigate {url}"));
            Ok(())
        }

        fn title(&self) -> DriverResult<String> {
            Ok("Fake".into())
        }

        fn find_element(&self, locator: &Locator) -> DriverResult<ElementRef> {
            match locator {
                Locator::Id(id) if id == "q" => Ok(ElementRef::new("native-q")),
                other => Err(DriverError::no_such_element(format!("Unable to locate {other}"))),
            }
        }

        fn find_elements(&self, _locator: &Locator) -> DriverResult<Vec<ElementRef>> {
            Ok(vec![ElementRef::new("a"), ElementRef::new("b")])
        }

        fn send_keys_to_element(&self, element: &ElementRef, keys: &str) -> DriverResult<()> {
            self.log(format!("keys {element} {keys}"));
            Ok(())
        }

        fn element_text(&self, element: &ElementRef) -> DriverResult<String> {
            Ok(format!("text of {element}"))
        }

        fn execute_script(&self, script: &str, args: Vec<ScriptValue>) -> DriverResult<ScriptValue> {
            self.log(format!("script {script} {args:?}"));
            Ok(ScriptValue::List(vec![
                ScriptValue::Element(ElementRef::new("returned")),
                ScriptValue::String("plain".into()),
            ]))
        }

        fn add_cookie(&self, cookie: Cookie) -> DriverResult<()> {
            self.log(format!("cookie {}={} expiry={:?}", cookie.name, cookie.value, cookie.expiry.map(|e| e.timestamp())));
            Ok(())
        }

        fn cookies(&self) -> DriverResult<Vec<Cookie>> {
            Ok(vec![Cookie::new("a", "1")])
        }

        fn switch_to_frame(&self, target: FrameTarget) -> DriverResult<()> {
            self.log(format!("frame {target:?}"));
            Ok(())
        }

        fn mouse_move_to(&self, element: Option<&ElementRef>, offset: Option<Point>) -> DriverResult<()> {
            self.log(format!("move {element:?} {offset:?}"));
            Ok(())
        }

        fn set_timeout(&self, kind: TimeoutKind, duration: std::time::Duration) -> DriverResult<()> {
            self.log(format!("timeout {kind:?} {}", duration.as_millis()));
            Ok(())
        }
    }

    struct Fixture {
        ctx: HandlerContext,
        calls: Arc<Mutex<Vec<String>>>,
    }

    fn fixture() -> Fixture {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let drivers = DriverRegistry::new();
        let sink = Arc::clone(&calls);
        drivers.register_constructor(Capabilities::chrome(), "recording", move || {
            Ok(Box::new(RecordingDriver { calls: Arc::clone(&sink) }) as Box<dyn Driver>)
        });
        let sessions = Arc::new(SessionRegistry::new(Arc::new(drivers)));
        Fixture { ctx: HandlerContext::new(sessions), calls }
    }

    fn start_session(f: &Fixture) -> SessionId {
        f.ctx.sessions.create_session(&Capabilities::new("chrome")).unwrap()
    }

    fn locator(pairs: &[(&str, &str)]) -> LocatorParams {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<BTreeMap<_, _>>()
    }

    fn body(value: Value) -> BodyParams {
        value.as_object().cloned().unwrap_or_default()
    }

    fn run(handler: BuildResult) -> Result<Value, CommandError> {
        handler?.execute()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scopes
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn unknown_session_fails_at_construction() {
        let f = fixture();
        let err = navigation::title(&f.ctx, &locator(&[("sessionId", "nope")]), &body(json!({})))
            .err()
            .unwrap();
        assert_eq!(
            err,
            CommandError::ResourceNotFound("Could not find active session with id 'nope'".into())
        );
    }

    #[test]
    fn missing_session_id_is_invalid_command() {
        let f = fixture();
        let err = navigation::title(&f.ctx, &locator(&[]), &body(json!({}))).err().unwrap();
        assert_eq!(err, CommandError::InvalidCommand("Command requires a session ID".into()));
    }

    fn session_scoped_handlers() -> Vec<(&'static str, HandlerFactory)> {
        use wd_protocol::DriverCommand as C;
        let sessionless =
            [C::STATUS, C::NEW_SESSION, C::GET_SESSION_LIST, C::DEFINE_DRIVER_MAPPING];
        builtin_handlers()
            .into_iter()
            .filter(|(command, _)| !sessionless.contains(command))
            .collect()
    }

    #[test]
    fn every_session_handler_rejects_unknown_session_before_body() {
        let f = fixture();
        let handlers = session_scoped_handlers();
        assert!(handlers.len() > 60);
        for (command, factory) in handlers {
            let err = factory(&f.ctx, &locator(&[("sessionId", "nope")]), &body(json!({})))
                .err()
                .unwrap_or_else(|| panic!("{command} built without a session"));
            assert!(matches!(err, CommandError::ResourceNotFound(_)), "{command}: {err:?}");
        }
    }

    #[test]
    fn every_session_handler_requires_session_id() {
        let f = fixture();
        for (command, factory) in session_scoped_handlers() {
            let err = factory(&f.ctx, &locator(&[]), &body(json!({})))
                .err()
                .unwrap_or_else(|| panic!("{command} built without a session id"));
            assert!(matches!(err, CommandError::InvalidCommand(_)), "{command}: {err:?}");
        }
    }

    #[test]
    fn timeouts_resolve_session_before_parameters() {
        let f = fixture();
        let loc = locator(&[("sessionId", "nope")]);
        for build in [timeouts::implicitly_wait, timeouts::async_script, timeouts::set_timeout] {
            let err = build(&f.ctx, &loc, &body(json!({"ms": "soon"}))).err().unwrap();
            assert!(matches!(err, CommandError::ResourceNotFound(_)), "{err:?}");
        }
        let sid = start_session(&f);
        let loc = locator(&[("sessionId", sid.as_str())]);
        let err = timeouts::implicitly_wait(&f.ctx, &loc, &body(json!({}))).err().unwrap();
        assert_eq!(err, CommandError::InvalidParameter("Parameter 'ms' not found".into()));
    }

    #[test]
    fn unknown_element_fails_at_construction() {
        let f = fixture();
        let sid = start_session(&f);
        let err = elements::text(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str()), ("id", "ghost")]),
            &body(json!({})),
        )
        .err()
        .unwrap();
        assert_eq!(err, CommandError::ResourceNotFound("Could not find element with id 'ghost'".into()));
    }

    #[test]
    fn session_handler_reports_its_session() {
        let f = fixture();
        let sid = start_session(&f);
        let mut handler =
            navigation::title(&f.ctx, &locator(&[("sessionId", sid.as_str())]), &body(json!({}))).unwrap();
        assert_eq!(handler.session_id(), Some(&sid));
        assert_eq!(handler.status_code(), HttpStatus::Ok);
        assert_eq!(handler.describe(), "[get title]");
        assert_eq!(handler.execute().unwrap(), json!("Fake"));
    }

    #[test]
    fn handler_runs_only_once() {
        let f = fixture();
        let sid = start_session(&f);
        let mut handler =
            navigation::title(&f.ctx, &locator(&[("sessionId", sid.as_str())]), &body(json!({}))).unwrap();
        handler.execute().unwrap();
        assert!(matches!(handler.execute(), Err(CommandError::Unhandled(_))));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Elements
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn find_element_wraps_a_fresh_handle() {
        let f = fixture();
        let sid = start_session(&f);
        let loc = locator(&[("sessionId", sid.as_str())]);
        let query = body(json!({"using": "id", "value": "q"}));

        let first = run(elements::find_element(&f.ctx, &loc, &query)).unwrap();
        let second = run(elements::find_element(&f.ctx, &loc, &query)).unwrap();
        let first = first["ELEMENT"].as_str().unwrap().to_string();
        let second = second["ELEMENT"].as_str().unwrap().to_string();
        assert_ne!(first, second);

        let text = run(elements::text(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str()), ("id", &first)]),
            &body(json!({})),
        ))
        .unwrap();
        assert_eq!(text, json!("text of native-q"));
    }

    #[test]
    fn find_elements_wraps_each_element() {
        let f = fixture();
        let sid = start_session(&f);
        let found = run(elements::find_elements(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str())]),
            &body(json!({"using": "tag name", "value": "a"})),
        ))
        .unwrap();
        let found = found.as_array().unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|e| e["ELEMENT"].is_string()));
    }

    #[test]
    fn unknown_locator_strategy_is_rejected() {
        let f = fixture();
        let sid = start_session(&f);
        let err = elements::find_element(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str())]),
            &body(json!({"using": "shadow", "value": "x"})),
        )
        .err()
        .unwrap();
        assert_eq!(err, CommandError::InvalidParameter("Cannot find on 'shadow'".into()));
    }

    #[test]
    fn missing_body_parameter_is_invalid_parameter() {
        let f = fixture();
        let sid = start_session(&f);
        let err = elements::find_element(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str())]),
            &body(json!({"using": "id"})),
        )
        .err()
        .unwrap();
        assert_eq!(err, CommandError::InvalidParameter("Parameter 'value' not found".into()));
    }

    #[test]
    fn driver_errors_surface_from_execute() {
        let f = fixture();
        let sid = start_session(&f);
        let err = run(elements::find_element(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str())]),
            &body(json!({"using": "id", "value": "missing"})),
        ))
        .unwrap_err();
        assert!(matches!(err, CommandError::Driver(ref e) if e.kind == DriverErrorKind::NoSuchElement));
    }

    #[test]
    fn send_keys_joins_key_sequences() {
        let f = fixture();
        let sid = start_session(&f);
        let handle = f.ctx.sessions.get_session(&sid).unwrap().elements().add(ElementRef::new("box"));
        run(elements::send_keys(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str()), ("id", &handle)]),
            &body(json!({"value": ["he", "llo"]})),
        ))
        .unwrap();
        assert_eq!(f.calls.lock().last().unwrap(), "keys box hello");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scripts
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn script_arguments_and_results_translate_elements() {
        let f = fixture();
        let sid = start_session(&f);
        let handle = f.ctx.sessions.get_session(&sid).unwrap().elements().add(ElementRef::new("arg"));
        let result = run(script::execute(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str())]),
            &body(json!({"script": "return x", "args": [{"ELEMENT": handle}, 3]})),
        ))
        .unwrap();

        let call = f.calls.lock().last().unwrap().clone();
        assert!(call.contains("Element(ElementRef(\"arg\"))"), "{call}");
        let returned = result[0]["ELEMENT"].as_str().unwrap();
        let session = f.ctx.sessions.get_session(&sid).unwrap();
        assert_eq!(session.elements().get(returned), Some(ElementRef::new("returned")));
        assert_eq!(result[1], "plain");
    }

    #[test]
    fn script_argument_with_unknown_element_is_rejected() {
        let f = fixture();
        let sid = start_session(&f);
        let err = script::execute(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str())]),
            &body(json!({"script": "x", "args": [[{"ELEMENT": "ghost"}]]})),
        )
        .err()
        .unwrap();
        assert!(matches!(err, CommandError::InvalidParameter(_)));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Server handlers
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn new_session_redirects_and_reports_session() {
        let f = fixture();
        let mut handler = server::new_session(
            &f.ctx,
            &locator(&[]),
            &body(json!({"desiredCapabilities": {"browserName": "chrome"}})),
        )
        .unwrap();
        assert_eq!(handler.status_code(), HttpStatus::SeeOther);
        assert_eq!(handler.session_id(), None);
        let value = handler.execute().unwrap();
        let sid = SessionId::new(value.as_str().unwrap());
        assert_eq!(handler.session_id(), Some(&sid));
        assert!(f.ctx.sessions.get_session(&sid).is_some());
    }

    #[test]
    fn new_session_requires_capability_object() {
        let f = fixture();
        let err = server::new_session(&f.ctx, &locator(&[]), &body(json!({"desiredCapabilities": 4})))
            .err()
            .unwrap();
        assert_eq!(
            err,
            CommandError::InvalidParameter("Parameter 'desiredCapabilities' is not a dictionary".into())
        );
    }

    #[test]
    fn new_session_without_match_is_instantiation_error() {
        let f = fixture();
        let desired = json!({"desiredCapabilities": {
            "browserName": "safari", "platform": "WINDOWS", "javascriptEnabled": false
        }});
        // Chrome is registered for any platform with JavaScript; only the platform scores.
        let mut handler = server::new_session(&f.ctx, &locator(&[]), &body(desired)).unwrap();
        assert!(handler.execute().is_ok());

        let empty = HandlerContext::new(Arc::new(SessionRegistry::new(Arc::new(DriverRegistry::new()))));
        let mut handler = server::new_session(
            &empty,
            &locator(&[]),
            &body(json!({"desiredCapabilities": {"browserName": "chrome"}})),
        )
        .unwrap();
        assert!(matches!(handler.execute(), Err(CommandError::DriverInstantiation(_))));
    }

    #[test]
    fn status_needs_no_session() {
        let f = fixture();
        let value = run(server::status(&f.ctx, &locator(&[]), &body(json!({})))).unwrap();
        assert!(value["build"]["version"].is_string());
        assert!(value["os"]["name"].is_string());
    }

    #[test]
    fn session_list_includes_capabilities() {
        let f = fixture();
        let sid = start_session(&f);
        let value = run(server::session_list(&f.ctx, &locator(&[]), &body(json!({})))).unwrap();
        assert_eq!(value[0]["id"], sid.as_str());
        assert_eq!(value[0]["capabilities"]["browserName"], "chrome");
        assert_eq!(value[0]["capabilities"]["javascriptEnabled"], true);
    }

    #[test]
    fn define_driver_mapping_reports_unknown_types() {
        let f = fixture();
        let failures = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&failures);
        f.ctx.drivers().on_registration_failed(move |failure| sink.lock().push(failure.driver_type.clone()));

        let value = run(server::define_driver_mapping(
            &f.ctx,
            &locator(&[]),
            &body(json!({"capabilities": {"browserName": "opera"}, "class": "OperaDriver"})),
        ))
        .unwrap();
        assert_eq!(value, Value::Null);
        assert_eq!(*failures.lock(), vec!["OperaDriver".to_string()]);
    }

    #[test]
    fn define_driver_mapping_registers_known_types() {
        let f = fixture();
        f.ctx.drivers().add_driver_type("recording", || {
            Ok(Box::new(RecordingDriver::default()) as Box<dyn Driver>)
        });
        run(server::define_driver_mapping(
            &f.ctx,
            &locator(&[]),
            &body(json!({"capabilities": {"browserName": "opera"}, "class": "recording"})),
        ))
        .unwrap();
        assert_eq!(f.ctx.drivers().len(), 2);
    }

    #[test]
    fn quit_removes_session() {
        let f = fixture();
        let sid = start_session(&f);
        run(session::quit(&f.ctx, &locator(&[("sessionId", sid.as_str())]), &body(json!({})))).unwrap();
        assert!(f.ctx.sessions.get_session(&sid).is_none());
    }

    #[test]
    fn not_implemented_handler_always_fails() {
        let mut handler = NotImplementedHandler::new("touchFlick");
        assert_eq!(handler.describe(), "[not implemented: touchFlick]");
        assert_eq!(
            handler.execute().unwrap_err(),
            CommandError::NotImplemented("Command not implemented".into())
        );
    }

    #[test]
    fn builtin_handlers_name_known_commands() {
        for (name, _) in builtin_handlers() {
            assert!(COMMANDS.iter().any(|c| c.name == name), "{name} is not in the command table");
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Cookies, frames, mouse, timeouts
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn add_cookie_parses_expiry() {
        let f = fixture();
        let sid = start_session(&f);
        run(cookies::add(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str())]),
            &body(json!({"cookie": {"name": "k", "value": "v", "expiry": 1700000000}})),
        ))
        .unwrap();
        assert_eq!(f.calls.lock().last().unwrap(), "cookie k=v expiry=Some(1700000000)");
    }

    #[test]
    fn cookie_requires_name() {
        let f = fixture();
        let sid = start_session(&f);
        let err = cookies::add(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str())]),
            &body(json!({"cookie": {"value": "v"}})),
        )
        .err()
        .unwrap();
        assert!(matches!(err, CommandError::InvalidParameter(_)));
    }

    #[test]
    fn get_cookies_omits_missing_expiry() {
        let f = fixture();
        let sid = start_session(&f);
        let value = run(cookies::get_all(&f.ctx, &locator(&[("sessionId", sid.as_str())]), &body(json!({}))))
            .unwrap();
        assert_eq!(value[0]["name"], "a");
        assert!(value[0].get("expiry").is_none());
    }

    #[test]
    fn switch_to_frame_targets() {
        let f = fixture();
        let sid = start_session(&f);
        let loc = locator(&[("sessionId", sid.as_str())]);
        run(window::switch_to_frame(&f.ctx, &loc, &body(json!({"id": null})))).unwrap();
        run(window::switch_to_frame(&f.ctx, &loc, &body(json!({"id": 2})))).unwrap();
        run(window::switch_to_frame(&f.ctx, &loc, &body(json!({"id": "3"})))).unwrap();
        run(window::switch_to_frame(&f.ctx, &loc, &body(json!({"id": "menu"})))).unwrap();
        let calls = f.calls.lock().clone();
        assert_eq!(
            calls,
            vec![
                "frame Default".to_string(),
                "frame Index(2)".to_string(),
                "frame Index(3)".to_string(),
                "frame Name(\"menu\")".to_string(),
            ]
        );
    }

    #[test]
    fn mouse_move_needs_both_offsets() {
        let f = fixture();
        let sid = start_session(&f);
        let loc = locator(&[("sessionId", sid.as_str())]);
        run(interactions::move_to(&f.ctx, &loc, &body(json!({"xoffset": 5})))).unwrap();
        run(interactions::move_to(&f.ctx, &loc, &body(json!({"xoffset": 5, "yoffset": 7})))).unwrap();
        let calls = f.calls.lock().clone();
        assert_eq!(calls[0], "move None None");
        assert_eq!(calls[1], "move None Some(Point { x: 5, y: 7 })");
    }

    #[test]
    fn timeouts_use_milliseconds() {
        let f = fixture();
        let sid = start_session(&f);
        let loc = locator(&[("sessionId", sid.as_str())]);
        run(timeouts::implicitly_wait(&f.ctx, &loc, &body(json!({"ms": 1500})))).unwrap();
        run(timeouts::set_timeout(&f.ctx, &loc, &body(json!({"type": "script", "ms": 20})))).unwrap();
        let calls = f.calls.lock().clone();
        assert_eq!(calls, vec!["timeout Implicit 1500".to_string(), "timeout Script 20".to_string()]);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Upload
    // ─────────────────────────────────────────────────────────────────────

    fn zip_of(files: &[(&str, &[u8])]) -> String {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for (name, content) in files {
            writer.start_file(*name, zip::write::SimpleFileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        STANDARD.encode(writer.finish().unwrap().into_inner())
    }

    #[test]
    fn upload_extracts_single_file() {
        let f = fixture();
        let dir = tempfile::tempdir().unwrap();
        let ctx = f.ctx.clone().with_upload_dir(dir.path());
        let sid = start_session(&f);

        let value = run(upload::upload_file(
            &ctx,
            &locator(&[("sessionId", sid.as_str())]),
            &body(json!({"file": zip_of(&[("hello.txt", b"hi there")])})),
        ))
        .unwrap();

        let expected = dir.path().join(format!("strontiumsession{sid}")).join("hello.txt");
        assert_eq!(value, json!(expected.to_string_lossy()));
        assert_eq!(std::fs::read_to_string(expected).unwrap(), "hi there");
    }

    #[test]
    fn upload_rejects_multiple_files() {
        let f = fixture();
        let sid = start_session(&f);
        let err = upload::upload_file(
            &f.ctx,
            &locator(&[("sessionId", sid.as_str())]),
            &body(json!({"file": zip_of(&[("a.txt", b"a"), ("b.txt", b"b")])})),
        )
        .err()
        .unwrap();
        assert_eq!(err, CommandError::InvalidParameter("Sending multiple files is not supported.".into()));
    }
}
