//! Fuzz target for news CSV parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ua_datasets::formats::io_news_csv::{from_news_csv_slice, parse_tags};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(table) = from_news_csv_slice(data) {
        for row in 0..table.len() {
            let _ = parse_tags(table.raw_tags(row).unwrap_or_default());
        }
    }
});
