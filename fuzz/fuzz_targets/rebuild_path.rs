#![no_main]
use jswitch_lib::runtimes::path_list::{is_java_segment, rebuild_path};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(current) = std::str::from_utf8(data) {
        let rebuilt = rebuild_path(current, r"D:\java\jdk-17.0.12\bin", ';');
        assert!(rebuilt.starts_with(r"D:\java\jdk-17.0.12\bin"));
        assert!(rebuilt.split(';').skip(1).all(|s| !is_java_segment(s)));
    }
});
