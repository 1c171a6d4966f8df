//! Fuzz target for the QA keyword text reader and validator.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ua_datasets::formats::io_qa_text::from_qa_text;
use ua_datasets::validation::{validate_qa_text, ValidateOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let opts = ValidateOptions {
            check_capitalization: true,
        };
        let _ = validate_qa_text(text, &opts);
        let _ = from_qa_text(text);
    }
});
