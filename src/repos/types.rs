use diesel::pg::PgConnection;
use diesel::r2d2::ConnectionManager;
use failure::Error as FailureError;
use r2d2::Pool;

/// Repos layer Result
pub type RepoResult<T> = Result<T, FailureError>;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
