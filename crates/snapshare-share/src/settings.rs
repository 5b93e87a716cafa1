use typed_builder::TypedBuilder;

/// TTL applied when a caller does not choose one.
pub const DEFAULT_TTL_DAYS: f64 = 90.0;

/// Configures a [`ShareRepository`](crate::ShareRepository).
#[derive(Debug, Clone, Copy, PartialEq, TypedBuilder)]
pub struct ShareSettings {
    /// Days a share stays readable under `ExpirationPolicy::Default`.
    ///
    /// `None` (or zero) makes default shares permanent.
    #[builder(default = Some(DEFAULT_TTL_DAYS))]
    pub default_ttl_days: Option<f64>,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
