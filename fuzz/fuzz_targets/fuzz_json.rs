#![no_main]

use jsrt::{JsValue, json_global};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process valid UTF-8
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    // Limit input size to avoid timeout
    if source.len() > 100_000 {
        return;
    }

    let json = json_global();

    // Parse should return Ok or Err, never panic
    let Ok(value) = json.call_method("parse", &[JsValue::from(source)]) else {
        return;
    };

    // Anything that parsed must stringify again
    let _ = json.call_method("stringify", &[value]);
});
