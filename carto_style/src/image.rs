// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Identifier for a registered image source.
///
/// This is a small, opaque handle handed out by the image source registry.
/// Registrations are never removed, so an id stays valid for the lifetime of
/// the registry that issued it.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub u32);
