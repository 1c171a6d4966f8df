//! Fuzz target for UA-SQuAD JSON parsing.
//!
//! Feeds arbitrary bytes to the QA JSON parser under both split modes,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ua_datasets::formats::io_squad_json::{from_squad_json_slice, SquadParseOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    for split in ["train", "val"] {
        let opts = SquadParseOptions {
            split: Some(split.to_string()),
            ..SquadParseOptions::default()
        };
        let _ = from_squad_json_slice(data, &opts);
    }
});
