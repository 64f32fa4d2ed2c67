// SPDX-License-Identifier: AGPL-3.0-or-later
#![no_main]

use forumtext_core::{format_plain, parse_directive};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let html = format_plain(text);
    assert!(html.starts_with("<p>") && html.ends_with("</p>"));

    if let Some((_, rest)) = parse_directive(text) {
        assert!(text.ends_with(rest));
    }
});
