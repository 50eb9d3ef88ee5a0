//! Sessions, drivers and element handles.
//!
//! The `Driver` trait is the seam to browser automation backends. The
//! registries in this crate own every live driver: drivers are matched
//! against desired capabilities by the `DriverRegistry`, owned by a
//! `DriverSession` inside the `SessionRegistry`, and the elements they hand
//! out are exposed to clients through each session's `ElementRepository`.

pub mod driver;
pub mod elements;
pub mod matcher;
pub mod registry;
pub mod session;

pub use driver::{
    Cookie, Driver, DriverResult, ElementRef, FrameTarget, Locator, MouseButton, Orientation,
    Point, ScriptValue, Size, TimeoutKind,
};
pub use elements::ElementRepository;
pub use registry::{
    DriverConstructor, DriverInstantiationError, DriverRegistry, RegistrationFailure,
};
pub use session::{DriverSession, SessionRegistry};
pub use wd_protocol::{Capabilities, DriverError, DriverErrorKind, Platform, SessionId};
