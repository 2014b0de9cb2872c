// Draco bitstream version constants.
//
// Both geometry types share a single bitstream revision. The header always
// carries the 16-bit flags field and all counts are varints.

/// Major version of the Draco Mesh bitstream.
pub const DRACO_MESH_BITSTREAM_VERSION_MAJOR: u8 = 2;

/// Minor version of the Draco Mesh bitstream.
pub const DRACO_MESH_BITSTREAM_VERSION_MINOR: u8 = 2;

/// Default version for Mesh encoding.
pub const DEFAULT_MESH_VERSION: (u8, u8) = (
    DRACO_MESH_BITSTREAM_VERSION_MAJOR,
    DRACO_MESH_BITSTREAM_VERSION_MINOR,
);

/// Default version for PointCloud encoding.
pub const DEFAULT_POINT_CLOUD_VERSION: (u8, u8) = DEFAULT_MESH_VERSION;

/// Oldest version the decoder accepts.
pub const MIN_SUPPORTED_VERSION: (u8, u8) = (2, 2);

/// Checks if the given version is at least the target version.
/// Returns true if (major, minor) >= (target_major, target_minor).
#[inline]
pub fn version_at_least(major: u8, minor: u8, target: (u8, u8)) -> bool {
    major > target.0 || (major == target.0 && minor >= target.1)
}

/// Returns true when the decoder understands streams written with this version.
#[inline]
pub fn is_supported_version(major: u8, minor: u8) -> bool {
    version_at_least(major, minor, MIN_SUPPORTED_VERSION) && (major, minor) <= DEFAULT_MESH_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_at_least() {
        assert!(version_at_least(2, 2, (2, 2)));
        assert!(version_at_least(3, 0, (2, 2)));
        assert!(!version_at_least(2, 1, (2, 2)));
        assert!(!version_at_least(1, 9, (2, 2)));
    }

    #[test]
    fn test_supported_versions() {
        assert!(is_supported_version(2, 2));
        assert!(!is_supported_version(2, 1));
        assert!(!is_supported_version(2, 3));
        assert!(!is_supported_version(3, 0));
    }
}
