//! The join's wait must be a genuine blocking wait: while every child is
//! pending, the process should burn no measurable processor time. This
//! lives in its own test binary so other tests' work cannot pollute the
//! process-wide CPU measurement.
#![cfg(unix)]

use std::thread;
use std::time::Duration;

use promise_join::{all, Promise, Thenable};

fn process_cpu_time() -> Duration {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    let status = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    assert_eq!(status, 0);
    let usage = unsafe { usage.assume_init() };
    let seconds = (usage.ru_utime.tv_sec + usage.ru_stime.tv_sec) as u64;
    let micros = (usage.ru_utime.tv_usec + usage.ru_stime.tv_usec) as u64;
    Duration::from_secs(seconds) + Duration::from_micros(micros)
}

#[test]
fn pending_join_consumes_no_cpu() {
    let sleepers: Vec<_> = (0..3)
        .map(|n| {
            Promise::<i32, ()>::new(move |resolve, _reject| {
                thread::sleep(Duration::from_millis(400));
                resolve.resolve(vec![n]);
            })
        })
        .collect();
    let joined = all(sleepers);

    let before = process_cpu_time();
    joined.observe(
        |values| assert_eq!(values, [0, 1, 2]),
        |rejection| panic!("{rejection}"),
    );
    let spent = process_cpu_time() - before;

    // A polling wait would burn roughly the full 400ms of wall time on a
    // core; a blocked wait burns close to none. The bound leaves slack
    // for thread startup and harness bookkeeping.
    assert!(
        spent < Duration::from_millis(100),
        "idle join wait consumed {spent:?} of processor time"
    );
}
