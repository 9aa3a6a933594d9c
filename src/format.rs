//! The 24-bit format descriptor that parameterizes a family of `.ini` dialects.
//!
//! Bit layout (see `DESIGN.md` for provenance): a `Format` packs losslessly
//! into the low 24 bits of a `u32` and back (`fton`/`ntof`), the way a C
//! bitfield struct would, except typed.

use bitflags::bitflags;

/// Special `delimiter_symbol` value meaning "any run of forgettable whitespace".
pub const ANY_SPACE: u8 = 0;

bitflags! {
    /// The nine orthogonal boolean dialect switches, packed into bits 16..23.
    pub struct FormatFlags: u8 {
        const NO_SINGLE_QUOTES         = 0b0000_0001;
        const NO_DOUBLE_QUOTES         = 0b0000_0010;
        const NO_SPACES_IN_NAMES       = 0b0000_0100;
        const IMPLICIT_IS_NOT_EMPTY    = 0b0000_1000;
        const DO_NOT_COLLAPSE_VALUES   = 0b0001_0000;
        const PRESERVE_EMPTY_QUOTES    = 0b0010_0000;
        const DISABLED_AFTER_SPACE     = 0b0100_0000;
        const DISABLED_CAN_BE_IMPLICIT = 0b1000_0000;
    }
}

/// Meaning of a `;`/`#` marker for a given format (`semicolon_marker` /
/// `hash_marker` fields).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MarkerMode {
    /// The marker opens either a comment or a disabled entry.
    OpensCommentOrDisabled = 0,
    /// The marker only ever opens a comment.
    OpensCommentOnly = 1,
    /// The marker opens a comment that is discarded: not dispatched, not counted.
    IgnoreSilently = 2,
    /// The byte is not a marker at all; it is an ordinary character.
    NotAMarker = 3,
}

impl MarkerMode {
    const fn from_bits(bits: u32) -> Self {
        match bits {
            0 => MarkerMode::OpensCommentOrDisabled,
            1 => MarkerMode::OpensCommentOnly,
            2 => MarkerMode::IgnoreSilently,
            _ => MarkerMode::NotAMarker,
        }
    }

    const fn to_bits(self) -> u32 {
        self as u32
    }
}

/// Meaning of a leading dot in a section path (`section_paths` field).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SectionPaths {
    /// A leading dot nests onto the current parent; otherwise the path is rooted.
    AbsoluteAndRelative = 0,
    /// A leading dot is stripped and the path is always rooted.
    AbsoluteOnly = 1,
    /// Sections are supported but `.` is a literal name byte, not nesting.
    OneLevelOnly = 2,
    /// Sections are not supported; `[...]` is reclassified as key or unknown.
    NoSections = 3,
}

impl SectionPaths {
    const fn from_bits(bits: u32) -> Self {
        match bits {
            0 => SectionPaths::AbsoluteAndRelative,
            1 => SectionPaths::AbsoluteOnly,
            2 => SectionPaths::OneLevelOnly,
            _ => SectionPaths::NoSections,
        }
    }

    const fn to_bits(self) -> u32 {
        self as u32
    }
}

/// Where multiline continuation is honored (`multiline_nodes` field).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MultilineNodes {
    /// Comments, sections and keys (disabled or not) may all continue.
    Everywhere = 0,
    /// Everything but comments may continue.
    ButComments = 1,
    /// Only active (non-disabled, non-comment) sections/keys may continue.
    ButDisabledAndComments = 2,
    /// Multiline continuation is disabled entirely.
    None = 3,
}

impl MultilineNodes {
    const fn from_bits(bits: u32) -> Self {
        match bits {
            0 => MultilineNodes::Everywhere,
            1 => MultilineNodes::ButComments,
            2 => MultilineNodes::ButDisabledAndComments,
            _ => MultilineNodes::None,
        }
    }

    const fn to_bits(self) -> u32 {
        self as u32
    }
}

/// A 24-bit `.ini` dialect descriptor.
///
/// Every field here corresponds 1:1 to a named bit range; see `DESIGN.md`
/// for the exact offsets. `fton`/`ntof` are a lossless bijection to/from the
/// packed `u32` representation (`Format::fton`/`Format::ntof`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Format {
    /// Byte separating keys from values. `ANY_SPACE` (`0`) means "any run
    /// of forgettable whitespace".
    pub delimiter_symbol: u8,
    /// If `false`, names are folded for comparison (and, with
    /// [`crate::config::set_lowercase_mode`], for dispatch).
    pub case_sensitive: bool,
    pub semicolon_marker: MarkerMode,
    pub hash_marker: MarkerMode,
    pub section_paths: SectionPaths,
    pub multiline_nodes: MultilineNodes,
    pub flags: FormatFlags,
}

impl Format {
    /// A model format for standard `.ini` files: `=` delimiter, both
    /// markers open a comment-or-disabled entry, relative and absolute
    /// section paths, multiline everywhere, every boolean flag `false`.
    pub const DEFAULT: Format = Format {
        delimiter_symbol: b'=',
        case_sensitive: false,
        semicolon_marker: MarkerMode::OpensCommentOrDisabled,
        hash_marker: MarkerMode::OpensCommentOrDisabled,
        section_paths: SectionPaths::AbsoluteAndRelative,
        multiline_nodes: MultilineNodes::Everywhere,
        flags: FormatFlags::empty(),
    };

    /// A model format for Unix-like `.conf` files: every field/flag is the
    /// all-zero-bits decoding, i.e. `delimiter_symbol = ANY_SPACE` and every
    /// enum field takes its `0` variant.
    pub const UNIX_LIKE: Format = Format {
        delimiter_symbol: ANY_SPACE,
        case_sensitive: false,
        semicolon_marker: MarkerMode::OpensCommentOrDisabled,
        hash_marker: MarkerMode::OpensCommentOrDisabled,
        section_paths: SectionPaths::AbsoluteAndRelative,
        multiline_nodes: MultilineNodes::Everywhere,
        flags: FormatFlags::empty(),
    };

    /// Packs `self` into the low 24 bits of a `u32`.
    pub const fn fton(self) -> u32 {
        (self.delimiter_symbol as u32 & 0x7f)
            | ((self.case_sensitive as u32) << 7)
            | (self.semicolon_marker.to_bits() << 8)
            | (self.hash_marker.to_bits() << 10)
            | (self.section_paths.to_bits() << 12)
            | (self.multiline_nodes.to_bits() << 14)
            | ((self.flags.bits() as u32) << 16)
    }

    /// Unpacks a `Format` from the low 24 bits of `id`; bits 24..31 are ignored.
    pub const fn ntof(id: u32) -> Format {
        Format {
            delimiter_symbol: (id & 0x7f) as u8,
            case_sensitive: (id >> 7) & 1 != 0,
            semicolon_marker: MarkerMode::from_bits((id >> 8) & 0b11),
            hash_marker: MarkerMode::from_bits((id >> 10) & 0b11),
            section_paths: SectionPaths::from_bits((id >> 12) & 0b11),
            multiline_nodes: MultilineNodes::from_bits((id >> 14) & 0b11),
            flags: FormatFlags::from_bits_truncate(((id >> 16) & 0xff) as u8),
        }
    }

    /// `INIFORMAT_HAS_NO_ESC`: does this format support no escape sequences
    /// whatsoever (no multiline continuation, and both quote kinds suppressed)?
    pub const fn has_no_esc(self) -> bool {
        matches!(self.multiline_nodes, MultilineNodes::None)
            && self.flags.contains(FormatFlags::NO_DOUBLE_QUOTES)
            && self.flags.contains(FormatFlags::NO_SINGLE_QUOTES)
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fton_fits_in_24_bits() {
        assert_eq!(Format::DEFAULT.fton() & !0x00ff_ffff, 0);
    }

    #[test]
    fn bijection_default() {
        let f = Format::DEFAULT;
        assert_eq!(Format::ntof(f.fton()), f);
    }

    #[test]
    fn bijection_unix_like() {
        let f = Format::UNIX_LIKE;
        assert_eq!(f.fton(), 0);
        assert_eq!(Format::ntof(f.fton()), f);
    }

    #[test]
    fn bijection_roundtrip_arbitrary() {
        let f = Format {
            delimiter_symbol: b':',
            case_sensitive: true,
            semicolon_marker: MarkerMode::OpensCommentOnly,
            hash_marker: MarkerMode::IgnoreSilently,
            section_paths: SectionPaths::OneLevelOnly,
            multiline_nodes: MultilineNodes::ButDisabledAndComments,
            flags: FormatFlags::NO_SINGLE_QUOTES
                | FormatFlags::PRESERVE_EMPTY_QUOTES
                | FormatFlags::DISABLED_AFTER_SPACE,
        };
        assert_eq!(Format::ntof(f.fton()), f);
    }

    #[test]
    fn ntof_ignores_upper_bits() {
        let id = Format::DEFAULT.fton() | (0xff << 24);
        assert_eq!(Format::ntof(id), Format::DEFAULT);
    }

    #[test]
    fn has_no_esc() {
        let mut f = Format::DEFAULT;
        f.multiline_nodes = MultilineNodes::None;
        f.flags = FormatFlags::NO_SINGLE_QUOTES | FormatFlags::NO_DOUBLE_QUOTES;
        assert!(f.has_no_esc());

        f.flags.remove(FormatFlags::NO_DOUBLE_QUOTES);
        assert!(!f.has_no_esc());
    }
}
