//! Create/replace semantics for set operations

/// Portable "fail if the attribute exists" flag, see [`SetMode::from_flags`]
pub const XATTR_CREATE: i32 = 0x1;

/// Portable "fail if the attribute does not exist" flag, see [`SetMode::from_flags`]
pub const XATTR_REPLACE: i32 = 0x2;

/// How a set operation treats an existing attribute
///
/// On Linux and Darwin the create/replace decision is made atomically by the
/// kernel. FreeBSD's `extattr_set_*` has no such flag, so `Create` and
/// `Replace` are checked with a separate lookup right before the write; a
/// concurrent writer can slip in between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetMode {
    /// Create the attribute or overwrite its value
    #[default]
    Upsert,
    /// Fail with `EEXIST` if the attribute already exists
    Create,
    /// Fail with `ENOATTR` if the attribute does not exist
    Replace,
}

impl SetMode {
    /// Interpret portable `XATTR_CREATE` / `XATTR_REPLACE` flags
    ///
    /// `0` is [`SetMode::Upsert`]. Returns `None` for unknown bits or when
    /// both flags are set.
    #[must_use]
    pub const fn from_flags(flags: i32) -> Option<Self> {
        match flags {
            0 => Some(Self::Upsert),
            XATTR_CREATE => Some(Self::Create),
            XATTR_REPLACE => Some(Self::Replace),
            _ => None,
        }
    }
}
