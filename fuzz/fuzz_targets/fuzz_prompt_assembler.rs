// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

#![no_main]

use libfuzzer_sys::fuzz_target;

use convit::config::SYSTEM_MESSAGE;
use convit::domain::{DiffSegment, GenerationMode, default_catalogue};
use convit::services::prompt::PromptAssembler;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // First line is the partial message, the rest is split into segments
    let (message, body) = text.split_once('\n').unwrap_or((text, ""));
    let segments: Vec<DiffSegment> = body.split('\0').map(DiffSegment::new).collect();

    let catalogue = default_catalogue();
    let assembler = PromptAssembler::new(SYSTEM_MESSAGE, &catalogue);

    let full = assembler.assemble(&segments, GenerationMode::Full, None);
    assert!(full.is_ok());

    match assembler.assemble(&segments, GenerationMode::ScopeOnly, Some(message)) {
        Ok(prompt) => {
            assert!(prompt.user.starts_with("message: "));
            assert!(prompt.system.starts_with(SYSTEM_MESSAGE));
        }
        Err(_) => assert!(message.trim().is_empty()),
    }
});
