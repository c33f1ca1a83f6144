//! Fuzz target for FDL JSON parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the FDL reader and runs
//! validation on whatever parses, checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(doc) = fdl::io::read_from_string(text, false) {
        let _ = doc.validate();
        let _ = fdl::io::write_to_string(&doc, false, None);
    }
});
