// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

enumerated! {
    /// DebugStatus represents the debug port state per RFC 9711 Section 4.2.9.
    pub struct DebugStatus("debug status") {
        /// Debug is currently enabled.
        ENABLED = 0 => "enabled",
        /// Debug is currently disabled.
        DISABLED = 1 => "disabled",
        /// Debug was disabled at boot and has not been enabled since.
        DISABLED_SINCE_BOOT = 2 => "disabled-since-boot",
        /// Debug is disabled and cannot be re-enabled.
        DISABLED_PERMANENTLY = 3 => "disabled-permanently",
        /// All debug, including DMA-based, is permanently disabled.
        DISABLED_FULLY_AND_PERMANENTLY = 4 => "disabled-fully-and-permanently",
    }
}
