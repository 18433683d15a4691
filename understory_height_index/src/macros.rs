// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(feature = "tracing")]
macro_rules! htrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "understory_height_index", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! htrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! hwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "understory_height_index", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! hwarn {
    ($($tt:tt)*) => {};
}
