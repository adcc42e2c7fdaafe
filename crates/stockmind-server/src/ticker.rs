//! Background ticker: fires due deferred work across all sessions.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::state::AppState;

/// Start the background ticker task.
pub fn start_scheduler_ticker(state: Arc<AppState>) -> JoinHandle<()> {
    let period = state.config.tick_interval();
    tokio::spawn(async move {
        info!("Scheduler ticker started ({}ms)", period.as_millis());
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let fired = state.sessions.tick_all();
            if fired > 0 {
                debug!("Fired {} deferred actions", fired);
            }
        }
    })
}
