//! Fuzz target for CoNLL-U POS parsing.
//!
//! Non-UTF-8 input is skipped; the file reader rejects it before parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ua_datasets::formats::io_conllu::from_conllu_str;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        for sentence in from_conllu_str(text) {
            assert_eq!(sentence.tokens().len(), sentence.tags().len());
        }
    }
});
