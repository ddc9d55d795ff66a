//! Anything that this library is unable to do without help from the OS,
//! which at the moment is only reading the wall clock.


/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(unix)]
pub(crate) fn sys_time() -> (i64, i16) {
    let mut tv = libc::timespec { tv_sec: 0, tv_nsec: 0 };

    // CLOCK_REALTIME always exists, and the pointer is to a live struct,
    // so the only failure left is one the OS would never report.
    let _ = unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, &mut tv) };
    (tv.tv_sec as i64, (tv.tv_nsec / 1_000_000) as i16)
}

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(not(unix))]
pub(crate) fn sys_time() -> (i64, i16) {
    use std::time::{SystemTime, UNIX_EPOCH};

    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d)  => (d.as_secs() as i64, d.subsec_millis() as i16),
        Err(e) => {
            let d = e.duration();
            let ms = d.subsec_millis() as i16;
            if ms == 0 { (-(d.as_secs() as i64), 0) }
                  else { (-(d.as_secs() as i64) - 1, 1000 - ms) }
        }
    }
}
