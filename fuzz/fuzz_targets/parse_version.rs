#![no_main]

use std::cmp::Ordering;

use kcheck_release::clean_release;
use kcheck_version::Version;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let version = Version::new(data);
    assert_eq!(version.to_string(), data);
    assert_eq!(version.cmp(&version), Ordering::Equal);

    let cleaned = clean_release(data);
    assert_eq!(clean_release(cleaned), cleaned);
});
