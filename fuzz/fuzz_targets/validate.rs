#![no_main]
use libfuzzer_sys::fuzz_target;

use json_check::{validate_with, Diagnostic, Options};

fuzz_target!(|data: &[u8]| {
    // Only valid UTF-8 reaches the validator.
    if let Ok(s) = std::str::from_utf8(data) {
        // Looking for panics: both the verdict and the diagnostic must be
        // computable for any input.
        if let Err(e) = validate_with(s, &Options::strict()) {
            let _ = Diagnostic::new(&e, s).to_string();
        }
    }
});
