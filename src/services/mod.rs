// Service exports
pub mod catalog;
pub mod geolocation;
pub mod notifier;
pub mod sessions;

pub use catalog::{load_catalog, parse_catalog, LoadError};
pub use geolocation::{GeolocationError, GeolocationProvider, IpGeolocationClient, ReportedLocation};
pub use notifier::{NoticeQueue, Notifier};
pub use sessions::{Session, SessionError, SessionStore};
