//! Protocol layer tests: command table, result codes, capabilities, errors.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;
    use wd_protocol::*;

    // ─────────────────────────────────────────────────────────────────────
    // Command table
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn command_names_are_unique() {
        let mut seen = HashSet::new();
        for info in COMMANDS {
            assert!(seen.insert(info.name), "duplicate command {}", info.name);
        }
    }

    #[test]
    fn method_and_path_pairs_are_unique() {
        let mut seen = HashSet::new();
        for info in COMMANDS {
            assert!(
                seen.insert((info.method, info.resource_path)),
                "{} {} declared twice",
                info.method,
                info.resource_path
            );
        }
    }

    #[test]
    fn resource_paths_are_rooted() {
        for info in COMMANDS {
            assert!(info.resource_path.starts_with('/'), "{}", info.resource_path);
        }
    }

    #[test]
    fn command_info_lookup() {
        let info = command_info(DriverCommand::FIND_ELEMENT).unwrap();
        assert_eq!(info.method, HttpMethod::Post);
        assert_eq!(info.resource_path, "/session/{sessionId}/element");
        assert!(command_info("noSuchCommand").is_none());
    }

    #[test]
    fn http_method_parse() {
        assert_eq!(HttpMethod::parse("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse("DELETE"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::parse("PUT"), None);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Status codes
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn wire_status_codes() {
        assert_eq!(WireStatus::Success.code(), 0);
        assert_eq!(WireStatus::NoSuchElement.code(), 7);
        assert_eq!(WireStatus::UnhandledError.code(), 13);
        assert_eq!(WireStatus::UnexpectedAlertOpen.code(), 26);
        assert_eq!(WireStatus::from_code(23), Some(WireStatus::NoSuchWindow));
        assert_eq!(WireStatus::from_code(99), None);
    }

    #[test]
    fn http_status_client_errors() {
        assert!(HttpStatus::BadRequest.is_client_error());
        assert!(HttpStatus::MethodNotAllowed.is_client_error());
        assert!(!HttpStatus::SeeOther.is_client_error());
        assert!(!HttpStatus::NotImplemented.is_client_error());
    }

    #[test]
    fn shutdown_path_detection_is_case_insensitive() {
        assert!(is_shutdown_path("/wd/hub/shutdown"));
        assert!(is_shutdown_path("/wd/hub/ShutDown"));
        assert!(!is_shutdown_path("/wd/hub/session"));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Capabilities
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn capabilities_from_json() {
        let map = json!({
            "browserName": "firefox",
            "version": 3,
            "platform": "linux",
            "javascriptEnabled": false,
            "acceptSslCerts": true
        });
        let caps = Capabilities::from_json(map.as_object().unwrap()).unwrap();
        assert_eq!(caps.browser_name.as_deref(), Some("firefox"));
        assert_eq!(caps.version.as_deref(), Some("3"));
        assert_eq!(caps.platform, Some(Platform::Linux));
        assert_eq!(caps.javascript_enabled, Some(false));
        assert_eq!(caps.extra.get("acceptSslCerts"), Some(&json!(true)));
    }

    #[test]
    fn capabilities_reject_unknown_platform() {
        let map = json!({"platform": "BEOS"});
        let err = Capabilities::from_json(map.as_object().unwrap()).unwrap_err();
        assert_eq!(err, CapabilityError::UnknownPlatform("BEOS".into()));
    }

    #[test]
    fn capabilities_to_json_uses_wire_keys() {
        let value = Capabilities::chrome().to_json();
        assert_eq!(value["browserName"], "chrome");
        assert_eq!(value["platform"], "ANY");
        assert_eq!(value["javascriptEnabled"], true);
        assert!(value["version"].is_null());
    }

    #[test]
    fn platform_families() {
        assert!(Platform::Xp.is_platform_type(Platform::Windows));
        assert!(Platform::Windows.is_platform_type(Platform::Vista));
        assert!(Platform::Linux.is_platform_type(Platform::Unix));
        assert!(Platform::Mac.is_platform_type(Platform::Unix));
        assert!(Platform::Android.is_platform_type(Platform::Any));
        assert!(!Platform::Mac.is_platform_type(Platform::Windows));
        assert!(!Platform::Windows.is_platform_type(Platform::Linux));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Errors
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn transport_level_errors_map_to_http_status() {
        let cases = [
            (CommandError::not_implemented("x"), HttpStatus::NotImplemented),
            (CommandError::invalid_command("x"), HttpStatus::MethodNotAllowed),
            (CommandError::resource_not_found("x"), HttpStatus::NotFound),
            (CommandError::invalid_parameter("x"), HttpStatus::BadRequest),
        ];
        for (err, status) in cases {
            assert!(err.is_transport_level());
            assert_eq!(err.http_status(), status);
            assert_eq!(err.wire_status(), WireStatus::Success);
        }
    }

    #[test]
    fn driver_errors_map_to_wire_codes() {
        let cases = [
            (DriverError::no_such_window("w"), 23),
            (DriverError::no_such_element("e"), 7),
            (DriverError::no_such_frame("f"), 8),
            (DriverError::stale_element("s"), 10),
            (DriverError::element_not_visible("v"), 11),
            (DriverError::invalid_element_state("i"), 12),
            (DriverError::not_implemented("n"), 12),
            (DriverError::xpath_lookup("x"), 19),
            (DriverError::timeout("t"), 21),
            (DriverError::unhandled_alert("a", "hello"), 26),
            (DriverError::unknown("u"), 13),
        ];
        for (err, code) in cases {
            let err = CommandError::from(err);
            assert!(!err.is_transport_level());
            assert_eq!(err.http_status(), HttpStatus::Ok);
            assert_eq!(err.wire_status().code(), code, "{err:?}");
        }
    }

    #[test]
    fn instantiation_and_unhandled_errors_are_code_13() {
        assert_eq!(CommandError::DriverInstantiation("no".into()).wire_status().code(), 13);
        assert_eq!(CommandError::unhandled("boom").wire_status().code(), 13);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Envelopes
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn response_serializes_null_session_id() {
        let value = serde_json::to_value(Response::success(None, json!("x"))).unwrap();
        assert_eq!(value, json!({"sessionId": null, "status": 0, "value": "x"}));
    }

    #[test]
    fn error_payload_shape() {
        let err = CommandError::from(DriverError::no_such_element("Unable to locate"));
        let payload = ErrorPayload::from_error("findElement", "[find element]", &err).to_value();
        assert_eq!(payload["message"], "findElement: Unable to locate");
        assert_eq!(payload["class"], "NoSuchElementError");
        assert_eq!(payload["screen"], "");
        assert_eq!(payload["stackTrace"][0]["className"], "[find element]");
        assert!(payload.get("alert").is_none());
    }

    #[test]
    fn error_payload_carries_alert_text() {
        let err = CommandError::from(DriverError::unhandled_alert("alert open", "Are you sure?"));
        let payload = ErrorPayload::from_error("click", "[click]", &err).to_value();
        assert_eq!(payload["alert"]["text"], "Are you sure?");
    }

    #[test]
    fn server_response_content_types() {
        let bad = ServerResponse::new(Response::empty(), HttpStatus::NotFound);
        assert_eq!(bad.content_type(), "text/plain");
        let ok = ServerResponse::ok(Response::empty());
        assert_eq!(ok.content_type(), "application/json;charset=UTF-8");
    }

    #[test]
    fn parse_body_variants() {
        assert!(Command::parse_body(b"").unwrap().is_empty());
        assert!(Command::parse_body(b"  \n").unwrap().is_empty());
        assert_eq!(Command::parse_body(br#"{"url":"http://a"}"#).unwrap()["url"], "http://a");
        assert!(matches!(
            Command::parse_body(b"[1,2]"),
            Err(CommandError::InvalidParameter(_))
        ));
        assert!(matches!(
            Command::parse_body(b"{nope"),
            Err(CommandError::InvalidParameter(_))
        ));
    }
}
