use crate::models::HealthRes;

/// Simple health service used by the REST API
///
/// This service provides a standardised way to check that the WebPages service is up.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "WebPages is alive".into(),
        }
    }
}
