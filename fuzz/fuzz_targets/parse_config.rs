#![no_main]
use jswitch_lib::config::Settings;
use jswitch_lib::runtimes::VersionRegistry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(settings) = Settings::parse(s)
    {
        let _ = VersionRegistry::from_settings(&settings);
    }
});
