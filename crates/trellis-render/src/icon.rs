//! Icon sources and state-dependent icon resolution.
//!
//! Widgets don't rasterize icons; they reference them. An [`IconSource`]
//! names where an icon comes from (a file path or a theme entry), and a
//! [`StateIconSet`] maps widget visual states to sources so one logical
//! icon can show a different image when pressed, disabled, or checked.
//!
//! # Example
//!
//! ```
//! use trellis_render::{DrawableState, IconSource, Size, StateIconSet};
//!
//! let icon = StateIconSet::new(
//!     IconSource::Named("checkbox_unchecked".into()),
//!     Size::new(24.0, 24.0),
//! )
//! .with_variant(DrawableState::ALL, IconSource::Named("checkbox_all".into()))
//! .with_variant(
//!     DrawableState::MULTIPLE,
//!     IconSource::Named("checkbox_multiple".into()),
//! );
//!
//! let state = DrawableState::ENABLED | DrawableState::ALL;
//! assert_eq!(
//!     icon.resolve(state),
//!     &IconSource::Named("checkbox_all".into())
//! );
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::types::Size;

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur while parsing icon references.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IconError {
    /// The icon reference string was empty.
    #[error("empty icon reference")]
    EmptyReference,

    /// A `theme:` reference had no name after the prefix.
    #[error("theme icon reference has no name")]
    MissingThemeName,
}

// ============================================================================
// Icon Sources
// ============================================================================

/// Where an icon comes from.
///
/// Sources are lightweight references; loading and rasterization are the
/// host's concern. Two sources compare equal when they reference the same
/// asset, which is what widget-level "same icon" checks rely on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconSource {
    /// An image file on disk.
    Path(PathBuf),
    /// A named entry resolved by the host's icon theme.
    Named(String),
}

impl IconSource {
    /// Get the path if this is a file source.
    pub fn path(&self) -> Option<&Path> {
        match self {
            IconSource::Path(p) => Some(p),
            IconSource::Named(_) => None,
        }
    }

    /// Get the theme entry name if this is a named source.
    pub fn name(&self) -> Option<&str> {
        match self {
            IconSource::Path(_) => None,
            IconSource::Named(n) => Some(n),
        }
    }
}

impl FromStr for IconSource {
    type Err = IconError;

    /// Parse a declarative icon reference.
    ///
    /// `theme:<name>` resolves through the host's icon theme; anything else
    /// is treated as a file path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IconError::EmptyReference);
        }
        if let Some(name) = s.strip_prefix("theme:") {
            if name.is_empty() {
                return Err(IconError::MissingThemeName);
            }
            Ok(IconSource::Named(name.to_string()))
        } else {
            Ok(IconSource::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for IconSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconSource::Path(p) => write!(f, "{}", p.display()),
            IconSource::Named(n) => write!(f, "theme:{}", n),
        }
    }
}

// ============================================================================
// Drawable State Flags
// ============================================================================

/// A set of widget visual states represented as bit flags.
///
/// Interaction flags (`ENABLED`, `PRESSED`, ...) combine with at most one
/// selection flag (`UNCHECKED`, `MULTIPLE`, `ALL`) to describe how a widget
/// should look at paint time.
///
/// # Example
///
/// ```
/// use trellis_render::DrawableState;
///
/// let state = DrawableState::ENABLED | DrawableState::PRESSED;
/// assert!(state.contains(DrawableState::PRESSED));
/// assert!(!state.contains(DrawableState::FOCUSED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DrawableState(u8);

impl DrawableState {
    /// No states.
    pub const NONE: DrawableState = DrawableState(0);
    /// The widget accepts input.
    pub const ENABLED: DrawableState = DrawableState(1 << 0);
    /// A press is in progress.
    pub const PRESSED: DrawableState = DrawableState(1 << 1);
    /// The widget has keyboard focus.
    pub const FOCUSED: DrawableState = DrawableState(1 << 2);
    /// The pointer is over the widget.
    pub const HOVERED: DrawableState = DrawableState(1 << 3);
    /// Selection state: nothing selected.
    pub const UNCHECKED: DrawableState = DrawableState(1 << 4);
    /// Selection state: some, but not all, items selected.
    pub const MULTIPLE: DrawableState = DrawableState(1 << 5);
    /// Selection state: every item selected.
    pub const ALL: DrawableState = DrawableState(1 << 6);

    /// Check if this set contains every flag in `flags`.
    pub fn contains(&self, flags: DrawableState) -> bool {
        (self.0 & flags.0) == flags.0
    }

    /// Check if this set shares any flag with `flags`.
    pub fn intersects(&self, flags: DrawableState) -> bool {
        (self.0 & flags.0) != 0
    }

    /// Check if no flags are set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DrawableState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        DrawableState(self.0 | rhs.0)
    }
}

impl BitOrAssign for DrawableState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for DrawableState {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        DrawableState(self.0 & rhs.0)
    }
}

// ============================================================================
// State Icon Sets
// ============================================================================

/// One logical icon with per-state variants.
///
/// Variants are consulted in insertion order; the first whose flags are all
/// present in the queried state wins. If nothing matches, the fallback
/// source is used. All variants share one intrinsic size; widgets draw the
/// icon at that size without scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct StateIconSet {
    /// Ordered state variants.
    variants: Vec<(DrawableState, IconSource)>,
    /// Source used when no variant matches.
    fallback: IconSource,
    /// Natural size shared by all variants, in logical pixels.
    intrinsic_size: Size,
}

impl StateIconSet {
    /// Create an icon set with only a fallback source.
    pub fn new(fallback: IconSource, intrinsic_size: Size) -> Self {
        Self {
            variants: Vec::new(),
            fallback,
            intrinsic_size,
        }
    }

    /// Add a state variant (builder pattern).
    pub fn with_variant(mut self, flags: DrawableState, source: IconSource) -> Self {
        self.add_variant(flags, source);
        self
    }

    /// Add a state variant.
    ///
    /// Variants added earlier take precedence over later ones.
    pub fn add_variant(&mut self, flags: DrawableState, source: IconSource) {
        self.variants.push((flags, source));
    }

    /// Resolve the source to draw for the given state.
    ///
    /// Returns the first variant whose flags are all present in `state`,
    /// or the fallback if none match.
    pub fn resolve(&self, state: DrawableState) -> &IconSource {
        self.variants
            .iter()
            .find(|(flags, _)| state.contains(*flags))
            .map(|(_, source)| source)
            .unwrap_or(&self.fallback)
    }

    /// The natural size shared by all variants.
    pub fn intrinsic_size(&self) -> Size {
        self.intrinsic_size
    }

    /// The fallback source.
    pub fn fallback(&self) -> &IconSource {
        &self.fallback
    }

    /// Number of state variants (not counting the fallback).
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> IconSource {
        IconSource::Named(name.to_string())
    }

    #[test]
    fn test_parse_theme_reference() {
        let source: IconSource = "theme:checkbox_all".parse().unwrap();
        assert_eq!(source, named("checkbox_all"));
        assert_eq!(source.name(), Some("checkbox_all"));
        assert_eq!(source.path(), None);
    }

    #[test]
    fn test_parse_path_reference() {
        let source: IconSource = "icons/checkbox.png".parse().unwrap();
        assert_eq!(source, IconSource::Path(PathBuf::from("icons/checkbox.png")));
        assert!(source.path().is_some());
    }

    #[test]
    fn test_parse_empty_reference() {
        assert_eq!(
            "".parse::<IconSource>(),
            Err(IconError::EmptyReference)
        );
        assert_eq!(
            "   ".parse::<IconSource>(),
            Err(IconError::EmptyReference)
        );
        assert_eq!(
            "theme:".parse::<IconSource>(),
            Err(IconError::MissingThemeName)
        );
    }

    #[test]
    fn test_display_roundtrip() {
        let source: IconSource = "theme:save".parse().unwrap();
        assert_eq!(source.to_string(), "theme:save");
        assert_eq!(source.to_string().parse::<IconSource>().unwrap(), source);
    }

    #[test]
    fn test_drawable_state_flags() {
        let state = DrawableState::ENABLED | DrawableState::ALL;
        assert!(state.contains(DrawableState::ENABLED));
        assert!(state.contains(DrawableState::ALL));
        assert!(state.contains(DrawableState::ENABLED | DrawableState::ALL));
        assert!(!state.contains(DrawableState::MULTIPLE));
        assert!(state.intersects(DrawableState::ALL | DrawableState::MULTIPLE));
        assert!(DrawableState::NONE.is_empty());
        assert!(!state.is_empty());
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let icon = StateIconSet::new(named("base"), Size::new(16.0, 16.0))
            .with_variant(DrawableState::PRESSED, named("pressed"))
            .with_variant(DrawableState::ENABLED, named("enabled"));

        // Both variants match; the earlier one wins.
        let state = DrawableState::ENABLED | DrawableState::PRESSED;
        assert_eq!(icon.resolve(state), &named("pressed"));
    }

    #[test]
    fn test_resolve_falls_back() {
        let icon = StateIconSet::new(named("base"), Size::new(16.0, 16.0))
            .with_variant(DrawableState::ALL, named("all"));

        assert_eq!(icon.resolve(DrawableState::UNCHECKED), &named("base"));
        assert_eq!(icon.resolve(DrawableState::NONE), &named("base"));
    }

    #[test]
    fn test_resolve_selection_variants() {
        let icon = StateIconSet::new(named("unchecked"), Size::new(24.0, 24.0))
            .with_variant(DrawableState::ALL, named("all"))
            .with_variant(DrawableState::MULTIPLE, named("multiple"));

        let base = DrawableState::ENABLED | DrawableState::FOCUSED;
        assert_eq!(icon.resolve(base | DrawableState::ALL), &named("all"));
        assert_eq!(
            icon.resolve(base | DrawableState::MULTIPLE),
            &named("multiple")
        );
        assert_eq!(
            icon.resolve(base | DrawableState::UNCHECKED),
            &named("unchecked")
        );
        assert_eq!(icon.variant_count(), 2);
        assert_eq!(icon.intrinsic_size(), Size::new(24.0, 24.0));
    }
}
