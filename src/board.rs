//! [`Host`] implementation for the bare board.
//!
//! The board has no companion transport, location service or job
//! scheduler, so those requests are logged and dropped. Redraw requests and
//! receiver registrations are latched for the event loop to act on.

use chrono::{FixedOffset, Offset, Utc};
use defmt::{debug, info};
use pixel_face::config::TIMEZONE_OFFSET_SECS;
use pixel_face::{Host, JobRequest, Receiver};

#[derive(Default)]
pub struct BoardHost {
    dirty: bool,
    battery_listening: bool,
}

impl BoardHost {
    /// Consume a pending redraw request.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    /// Whether battery samples should be forwarded to the engine.
    pub fn battery_listening(&self) -> bool {
        self.battery_listening
    }
}

impl Host for BoardHost {
    fn invalidate(&mut self) {
        self.dirty = true;
    }

    fn register_receiver(&mut self, receiver: Receiver) {
        debug!("Host: register {}", receiver);
        if receiver == Receiver::Battery {
            self.battery_listening = true;
        }
    }

    fn unregister_receiver(&mut self, receiver: Receiver) {
        debug!("Host: unregister {}", receiver);
        if receiver == Receiver::Battery {
            self.battery_listening = false;
        }
    }

    fn system_timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(TIMEZONE_OFFSET_SECS).unwrap_or(Utc.fix())
    }

    fn has_location_permission(&self) -> bool {
        false
    }

    fn request_location_permission(&mut self) {
        info!("Host: no location service on this board");
    }

    fn enqueue_job(&mut self, job: JobRequest) {
        info!("Host: no job scheduler, dropping {}", job);
    }

    fn cancel_jobs_by_tag(&mut self, tag: &str) {
        debug!("Host: cancel jobs tagged {}", tag);
    }

    fn add_sync_listener(&mut self) {
        debug!("Host: settings arrive from the button only");
    }

    fn remove_sync_listener(&mut self) {}
}
