//! Case Views
//!
//! Fetch-state lifecycle and derived-view projection for five single-page
//! case studies (product listing, product detail, user dashboard, blog
//! posts, todo tracker).
//!
//! Layered architecture:
//! - domain: Fetched entities and the fetch error taxonomy
//! - api: Endpoints, the transport seam and the JSON fetcher
//! - store: Resources with status, projection engine, quantity clamp
//! - views: One state machine per case study
//! - driver: Event queue running a view's fetches
//! - session: Host entry point

pub mod config;
pub mod domain;
pub mod api;
pub mod store;
pub mod views;
pub mod driver;
pub mod session;

pub use config::{ApiConfig, ConfigError};
pub use driver::ViewDriver;
pub use session::{Session, SessionError};
