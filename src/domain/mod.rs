// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

mod commit;
mod diff;
mod prompt;

pub use commit::*;
pub use diff::*;
pub use prompt::*;
