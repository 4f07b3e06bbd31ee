extern crate std;

use core::{cell::RefCell, task::Waker};
use embassy_time_driver::Driver;
use std::time::SystemTime;

/// Clock for host tests. Each test thread has its own time which only moves when the test sets it
/// or a timer is awaited; a timer wake jumps the clock straight to the deadline.
struct TestTimeDriver;

impl Driver for TestTimeDriver {
    fn now(&self) -> u64 {
        NOW.with_borrow(|now| {
            if *now == 0 {
                SystemTime::now()
                    .duration_since(SystemTime::UNIX_EPOCH)
                    .unwrap()
                    .as_micros() as u64
            } else {
                *now
            }
        })
    }

    fn schedule_wake(&self, at: u64, waker: &Waker) {
        NOW.with_borrow_mut(|now| {
            if *now != 0 && at > *now {
                *now = at;
            }
        });

        waker.wake_by_ref();
    }
}

std::thread_local! {
    static NOW: RefCell<u64> = const {RefCell::new(0)};
}

embassy_time_driver::time_driver_impl!(static TIME_DRIVER: TestTimeDriver = TestTimeDriver);

/// Set the current thread's time in ticks. Zero falls back to the system clock.
pub fn set_time(t: u64) {
    NOW.with_borrow_mut(|now| *now = t);
}

pub fn set_time_ms(ms: u64) {
    set_time(embassy_time::Duration::from_millis(ms).as_ticks());
}

pub fn advance_ms(ms: u64) {
    let ticks = embassy_time::Duration::from_millis(ms).as_ticks();
    NOW.with_borrow_mut(|now| *now += ticks);
}
