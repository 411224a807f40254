// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sidetree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidetree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sidetree — sidebar saved-list tree engine (drag/drop + persistence).
//!
//! The crate is headless: rendering, routing and record APIs stay outside
//! and talk to the engine through the `store` and `notify` seams.

pub mod drag;
pub mod menu;
pub mod model;
pub mod notify;
pub mod store;
pub mod tree;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
