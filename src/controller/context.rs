use std::sync::Arc;

use futures_cpupool::CpuPool;
use r2d2::{ManageConnection, Pool};

use config::Config;

/// Static context for all app
pub struct StaticContext<M: ManageConnection, F> {
    pub db_pool: Pool<M>,
    pub cpu_pool: CpuPool,
    pub config: Arc<Config>,
    pub repo_factory: F,
}

impl<M: ManageConnection, F: Clone> StaticContext<M, F> {
    /// Create a new static context
    pub fn new(db_pool: Pool<M>, cpu_pool: CpuPool, config: Arc<Config>, repo_factory: F) -> Self {
        Self {
            db_pool,
            cpu_pool,
            config,
            repo_factory,
        }
    }
}

impl<M: ManageConnection, F: Clone> Clone for StaticContext<M, F> {
    fn clone(&self) -> Self {
        Self {
            db_pool: self.db_pool.clone(),
            cpu_pool: self.cpu_pool.clone(),
            config: self.config.clone(),
            repo_factory: self.repo_factory.clone(),
        }
    }
}
