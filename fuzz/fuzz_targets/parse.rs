#![no_main]
use libfuzzer_sys::fuzz_target;

use localtime::{PosixTimezone, TransitionRule};

fuzz_target!(|data: &[u8]| {
    if let Ok(tz_string) = std::str::from_utf8(data) {
        let _ = tz_string.parse::<PosixTimezone>();
        let _ = tz_string.parse::<TransitionRule>();
    }
});
