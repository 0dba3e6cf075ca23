//! Mapping of `.vox` palette indices to output material identifiers.

use core::fmt;
use std::collections::BTreeMap;

// -------------------------------------------------------------------------------------------------

/// Identifier of a block material, as stored in the output grid.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(transparent)]
#[expect(clippy::exhaustive_structs)]
pub struct MaterialId(pub u32);

impl MaterialId {
    /// The material of empty cells.
    pub const AIR: Self = Self(0);
}

impl From<u8> for MaterialId {
    /// Reuses a color index as a material identifier.
    fn from(color_index: u8) -> Self {
        Self(u32::from(color_index))
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// -------------------------------------------------------------------------------------------------

/// Explicit assignments of materials to color indices.
///
/// Serializes as a map from color index to material identifier; in JSON, that is an object
/// such as `{"1": 1, "2": 7}`.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct MaterialOverrides {
    map: BTreeMap<u8, MaterialId>,
}

impl MaterialOverrides {
    /// Constructs an empty table, which assigns nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table used when no other is configured: color 1 is log (material 1) and
    /// color 2 is stone (material 2).
    pub fn builtin() -> Self {
        Self::from_iter([(1, MaterialId(1)), (2, MaterialId(2))])
    }

    /// Assigns `material` to `color_index`, returning the previous assignment if any.
    pub fn insert(&mut self, color_index: u8, material: MaterialId) -> Option<MaterialId> {
        self.map.insert(color_index, material)
    }

    /// Returns the material explicitly assigned to `color_index`.
    pub fn get(&self, color_index: u8) -> Option<MaterialId> {
        self.map.get(&color_index).copied()
    }

    /// Iterates over all assignments in order of color index.
    pub fn iter(&self) -> impl Iterator<Item = (u8, MaterialId)> + '_ {
        self.map.iter().map(|(&index, &material)| (index, material))
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(u8, MaterialId)> for MaterialOverrides {
    fn from_iter<T: IntoIterator<Item = (u8, MaterialId)>>(iter: T) -> Self {
        Self {
            map: BTreeMap::from_iter(iter),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// How to resolve a nonzero color index that has no entry in [`MaterialOverrides`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum UnknownIndexPolicy {
    /// Fail the conversion, reporting every such index.
    #[default]
    Strict,
    /// Use the color index itself as the material identifier.
    AutoIdentity,
    /// Use the given material for every such index.
    Fallback(MaterialId),
}

impl UnknownIndexPolicy {
    /// Chooses a policy from independent command-line style switches.
    ///
    /// `auto_identity` takes precedence over `fallback` when both are given.
    pub fn from_flags(auto_identity: bool, fallback: Option<MaterialId>) -> Self {
        match (auto_identity, fallback) {
            (true, Some(material)) => {
                log::warn!(
                    "both auto-identity and default material {material} were requested; \
                    using auto-identity"
                );
                Self::AutoIdentity
            }
            (true, None) => Self::AutoIdentity,
            (false, Some(material)) => Self::Fallback(material),
            (false, None) => Self::Strict,
        }
    }
}

/// Complete rule for choosing the material of each color index.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MaterialMapping {
    overrides: MaterialOverrides,
    policy: UnknownIndexPolicy,
}

impl MaterialMapping {
    /// Combines an override table with a policy for indices it does not cover.
    ///
    /// Color index 0 is always air; an override for it has no effect.
    pub fn new(overrides: MaterialOverrides, policy: UnknownIndexPolicy) -> Self {
        if let Some(material) = overrides.get(0)
            && material != MaterialId::AIR
        {
            log::warn!(
                "ignoring override of color index 0 to material {material}; 0 is always air"
            );
        }
        Self { overrides, policy }
    }

    #[allow(missing_docs)]
    pub fn overrides(&self) -> &MaterialOverrides {
        &self.overrides
    }

    #[allow(missing_docs)]
    pub fn policy(&self) -> UnknownIndexPolicy {
        self.policy
    }

    /// Returns the material for `color_index`, or [`None`] if it is unmapped under
    /// [`UnknownIndexPolicy::Strict`].
    pub fn resolve(&self, color_index: u8) -> Option<MaterialId> {
        if color_index == 0 {
            return Some(MaterialId::AIR);
        }
        if let Some(material) = self.overrides.get(color_index) {
            return Some(material);
        }
        match self.policy {
            UnknownIndexPolicy::Strict => None,
            UnknownIndexPolicy::AutoIdentity => Some(MaterialId::from(color_index)),
            UnknownIndexPolicy::Fallback(material) => Some(material),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Error from converting voxels whose color indices are not covered by the
/// [`MaterialMapping`] in [`UnknownIndexPolicy::Strict`] mode.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub struct UnmappedColorIndices {
    /// Each unmapped color index, in increasing order, with the number of voxels using it.
    pub indices: Vec<(u8, usize)>,
}

impl fmt::Display for UnmappedColorIndices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unmapped MagicaVoxel color indices found: ")?;
        for (i, (index, count)) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index} (count={count})")?;
        }
        write!(
            f,
            "; add material overrides for them or choose the auto-identity or default policy"
        )
    }
}

// -------------------------------------------------------------------------------------------------
