//! Session
//!
//! Host entry point: wires configuration, logging and the HTTP transport,
//! then hands out a driver per case-study view.

use std::sync::Arc;

use crate::api::{Fetcher, HttpTransport, Transport};
use crate::config::ApiConfig;
use crate::driver::ViewDriver;
use crate::views::{BlogPosts, ProductDetail, ProductListing, TodoTracker, UserDashboard};

pub const APP_NAME: &str = "CaseViews";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to start logger: {0}")]
    Logger(#[from] rolling_logger::LoggerError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub struct Session {
    fetcher: Arc<Fetcher>,
}

impl Session {
    /// Start a session against the real endpoints
    ///
    /// Initializes the rolling logger when `log_dir` is configured and no
    /// logger is running yet.
    pub fn start(config: ApiConfig) -> Result<Self, SessionError> {
        if let Some(dir) = &config.log_dir {
            if !rolling_logger::is_initialized() {
                rolling_logger::init_logger(dir.clone(), APP_NAME)?;
                rolling_logger::info(&format!("{} logging to {}", APP_NAME, dir.display()))?;
            }
        }
        let transport = HttpTransport::new(&config).map_err(|e| {
            // only reaches the file when a logger is running
            let _ = rolling_logger::error(&format!("HTTP client setup failed: {}", e));
            e
        })?;
        let session = Self::with_transport(config, Arc::new(transport));
        log::info!(
            "[SESSION] started (store: {}, placeholder: {})",
            session.config().store_base(),
            session.config().placeholder_base()
        );
        Ok(session)
    }

    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            fetcher: Arc::new(Fetcher::new(transport, config)),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        self.fetcher.config()
    }

    pub fn fetcher(&self) -> Arc<Fetcher> {
        Arc::clone(&self.fetcher)
    }

    pub fn product_listing(&self) -> ViewDriver<ProductListing> {
        ViewDriver::new(ProductListing::new(), self.fetcher())
    }

    pub fn product_detail(&self, product_id: Option<u32>) -> ViewDriver<ProductDetail> {
        let view = match product_id {
            Some(id) => ProductDetail::for_product(id),
            None => ProductDetail::new(),
        };
        ViewDriver::new(view, self.fetcher())
    }

    pub fn user_dashboard(&self) -> ViewDriver<UserDashboard> {
        ViewDriver::new(UserDashboard::new(), self.fetcher())
    }

    pub fn blog_posts(&self) -> ViewDriver<BlogPosts> {
        ViewDriver::new(BlogPosts::new(self.config().excerpt_len), self.fetcher())
    }

    pub fn todo_tracker(&self) -> ViewDriver<TodoTracker> {
        ViewDriver::new(TodoTracker::new(self.config().todo_limit), self.fetcher())
    }
}
