//! Share repository: the create/fetch lifecycle of share envelopes.

pub mod repository;
pub mod settings;

pub use repository::ShareRepository;
pub use settings::ShareSettings;
