use thiserror::Error;

/// Failures while bringing up a throwaway container.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("container error: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("{service} did not answer after {attempts} attempts")]
    NotReady {
        service: &'static str,
        attempts: u32,
    },
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
