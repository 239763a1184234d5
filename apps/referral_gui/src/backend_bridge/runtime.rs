//! Timer runtime shared by every deferred task the form schedules.

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};

pub fn launch() -> Result<Runtime> {
    let runtime = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("referral-timers")
        .enable_time()
        .build()
        .context("failed to build timer runtime")?;
    tracing::debug!("timer runtime started");
    Ok(runtime)
}
