// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Reasons a [`HeightIndex`](crate::HeightIndex) operation was rejected.
///
/// Mutations validate their input before touching the index, so receiving one
/// of these means the sequence, the identity mapping, and the hooks were left
/// exactly as they were.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeightIndexError {
    /// The anchor passed to [`insert_batch`](crate::HeightIndex::insert_batch) is not in the index.
    AnchorNotFound,
    /// An id passed to a removal or update is not in the index.
    NotFound,
    /// The ids passed to [`remove_batch`](crate::HeightIndex::remove_batch) do not
    /// name one ascending, gap-free run of positions.
    NotContiguous,
    /// An inserted item's id is already in the index or repeats within the batch.
    DuplicateId,
    /// No item occupies the queried offset.
    OutOfRange,
}

impl fmt::Display for HeightIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AnchorNotFound => "anchor item does not exist",
            Self::NotFound => "item does not exist",
            Self::NotContiguous => "removed items are not a contiguous run",
            Self::DuplicateId => "item id is already present",
            Self::OutOfRange => "offset is outside the indexed content",
        })
    }
}

impl core::error::Error for HeightIndexError {}
