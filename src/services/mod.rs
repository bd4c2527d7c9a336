//! Services is a core layer for the app business logic like
//! validation, vote bookkeeping, etc.

pub mod coupons;
pub mod types;

pub use self::coupons::*;

use diesel::connection::AnsiTransactionManager;
use diesel::pg::Pg;
use diesel::Connection;
use failure::{Error as FailureError, Fail};
use futures_cpupool::CpuPool;
use r2d2::{ManageConnection, PooledConnection};

use self::types::ServiceFuture;
use controller::context::StaticContext;
use errors::Error;
use repos::ReposFactory;

/// Service
pub struct Service<M: ManageConnection, F> {
    pub static_context: StaticContext<M, F>,
}

impl<
        T: Connection<Backend = Pg, TransactionManager = AnsiTransactionManager> + 'static,
        M: ManageConnection<Connection = T>,
        F: ReposFactory<T>,
    > Service<M, F>
{
    /// Create a new service
    pub fn new(static_context: StaticContext<M, F>) -> Self {
        Self { static_context }
    }

    /// Runs `f` on the cpu pool with a connection taken from the db pool
    pub fn spawn_on_pool<R, Func>(&self, f: Func) -> ServiceFuture<R>
    where
        Func: FnOnce(PooledConnection<M>) -> Result<R, FailureError> + Send + 'static,
        R: Send + 'static,
    {
        let db_pool = self.static_context.db_pool.clone();
        let cpu_pool: CpuPool = self.static_context.cpu_pool.clone();

        Box::new(cpu_pool.spawn_fn(move || {
            db_pool
                .get()
                .map_err(|e| e.context(Error::Connection).into())
                .and_then(f)
        }))
    }
}
