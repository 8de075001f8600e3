//! Style resolution: merge policies and their memoization.
//!
//! This module provides [`Resolver`], which combines a style with other
//! styles according to one of four operations:
//!
//! | Operation | Parent | Existing values | Font family | Fallback |
//! |-----------|--------|-----------------|-------------|----------|
//! | [`mutate`](Resolver::mutate) | a single value | replaced | replaced | replaced |
//! | [`apply_inherited_style`](Resolver::apply_inherited_style) | ancestor | kept | filled only if unset | pulled, then re-derived |
//! | [`apply_global_style`](Resolver::apply_global_style) | library default | kept | filled only if unset | re-derived |
//! | [`override_style`](Resolver::override_style) | later style | replaced | replaced | replaced |
//!
//! # Design
//!
//! Every operation is a pure function of its arguments, so results are
//! memoized in one table per operation, keyed by the argument values. Styles
//! hash in constant time (the content hash is computed when a style is
//! built), which keeps lookups cheap even for styles with fallback chains.
//!
//! A cached result is returned as the same instance on every hit. When the
//! result equals the receiver, the receiver itself is returned instead, so
//! callers can compare results with [`TextStyle::ptr_eq`] to detect no-ops.
//!
//! # Fallback Chains
//!
//! After inheriting (or applying the library default), the style's own
//! values are pushed down its fallback chain: each fallback style receives
//! the values of the style above it, except the fallback's own font family
//! and the link to its own fallback. Chains deeper than
//! [`MAX_FALLBACK_DEPTH`] are a contract violation and panic; use
//! [`TextStyle::validate`] to reject them up front.

mod cache;

pub use cache::CacheStats;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::style::{Property, PropertyId, StyleValidationError, StyleValue, TextStyle, ValueEntry};
use cache::ResolutionCache;

/// Longest fallback chain resolution will follow.
pub const MAX_FALLBACK_DEPTH: usize = 64;

/// Policy for merging a parent style into a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplyOptions {
    /// Parent values replace values the style already defines.
    pub override_style: bool,
    /// The parent's font family replaces a non-blank font family.
    pub override_font_family: bool,
    /// The fallback property takes part in the merge.
    pub allow_fallback: bool,
}

impl ApplyOptions {
    /// Child wins over ancestor.
    pub const INHERIT: ApplyOptions = ApplyOptions {
        override_style: false,
        override_font_family: false,
        allow_fallback: true,
    };

    /// Library default backstop.
    pub const GLOBAL: ApplyOptions = ApplyOptions {
        override_style: false,
        override_font_family: false,
        allow_fallback: true,
    };

    /// Parent wins everywhere.
    pub const OVERRIDE: ApplyOptions = ApplyOptions {
        override_style: true,
        override_font_family: true,
        allow_fallback: true,
    };

    fn fallback_chain(override_style: bool) -> ApplyOptions {
        ApplyOptions {
            override_style,
            override_font_family: false,
            allow_fallback: false,
        }
    }
}

fn is_blank_font_family(style: &TextStyle) -> bool {
    style
        .font_family()
        .map_or(true, |family| family.trim().is_empty())
}

fn can_mutate(property: PropertyId, style: &TextStyle, options: ApplyOptions) -> bool {
    match property {
        PropertyId::FontFamily => options.override_font_family || is_blank_font_family(style),
        PropertyId::Fallback => options.allow_fallback,
        _ => true,
    }
}

fn mutate_style(
    origin: &TextStyle,
    property: PropertyId,
    entry: &ValueEntry,
    override_value: bool,
) -> TextStyle {
    if override_value && !entry.has_value() {
        return origin.clone();
    }

    if !override_value && origin.entry(property).has_value() {
        return origin.clone();
    }

    origin.with_entry(property, entry.clone())
}

/// Merges `parent` into `style` under `options`, without caching.
///
/// Properties are visited in [`PropertyId::ALL`] order. A blank font family
/// (unset or whitespace only) can always take the parent's, but without
/// `override_style` only an unset one is filled.
pub fn merge(style: &TextStyle, parent: &TextStyle, options: ApplyOptions) -> TextStyle {
    PropertyId::all().fold(style.clone(), |current, property| {
        if !can_mutate(property, &current, options) {
            return current;
        }
        mutate_style(&current, property, parent.entry(property), options.override_style)
    })
}

fn unchanged_or(style: &TextStyle, resolved: TextStyle) -> TextStyle {
    if resolved == *style {
        style.clone()
    } else {
        resolved
    }
}

/// Pushes `style`'s values down its fallback chain.
///
/// `depth` is the number of links already followed above `style`.
fn update_font_fallback(style: &TextStyle, override_style: bool, depth: usize) -> TextStyle {
    let Some(fallback) = style.fallback() else {
        return style.clone();
    };

    let link = depth + 1;
    if link > MAX_FALLBACK_DEPTH {
        let err = StyleValidationError::FallbackChainTooDeep {
            depth: link + fallback.fallback_depth(),
            limit: MAX_FALLBACK_DEPTH,
        };
        panic!("{}", err);
    }

    log::trace!("updating fallback link {}", link);
    let merged = merge(fallback, style, ApplyOptions::fallback_chain(override_style));
    let updated = update_font_fallback(&merged, override_style, link);

    mutate_style(
        style,
        PropertyId::Fallback,
        &ValueEntry::present(updated),
        true,
    )
}

type MutateKey = (TextStyle, PropertyId, ValueEntry);
type PairKey = (TextStyle, TextStyle);

static GLOBAL_RESOLVER: Lazy<Resolver> = Lazy::new(Resolver::new);

/// The four resolution operations, each backed by its own cache.
///
/// [`TextStyle`]'s resolution methods use the process-wide instance returned
/// by [`Resolver::global`]. A separate resolver shares no cached results with
/// it, which is mostly useful for observing cache behavior in isolation.
///
/// # Example
///
/// ```rust
/// use textstyle::{Resolver, TextStyle};
///
/// let resolver = Resolver::new();
/// let parent = TextStyle::new().with_font_family("Times");
/// let child = TextStyle::new().with_size(9.0);
///
/// let resolved = resolver.apply_inherited_style(&child, &parent);
/// assert_eq!(resolved.font_family(), Some("Times"));
/// assert_eq!(resolved.size(), Some(9.0));
/// assert_eq!(resolver.stats().inherited, 1);
/// ```
pub struct Resolver {
    mutate: ResolutionCache<MutateKey>,
    inherited: ResolutionCache<PairKey>,
    global: ResolutionCache<TextStyle>,
    overridden: ResolutionCache<PairKey>,
}

impl Resolver {
    /// Creates a resolver with empty caches.
    pub fn new() -> Self {
        Self {
            mutate: ResolutionCache::new("mutate"),
            inherited: ResolutionCache::new("inherited"),
            global: ResolutionCache::new("global"),
            overridden: ResolutionCache::new("override"),
        }
    }

    /// Returns the process-wide resolver.
    pub fn global() -> &'static Resolver {
        &GLOBAL_RESOLVER
    }

    /// Sets one property, replacing any existing value.
    ///
    /// Writing `None` never clears an existing value, and writing the value
    /// already held returns `style` itself.
    pub fn mutate<T: StyleValue>(
        &self,
        style: &TextStyle,
        property: Property<T>,
        value: Option<T>,
    ) -> TextStyle {
        self.mutate_entry(style, property.id(), ValueEntry::from(value))
    }

    /// Untyped form of [`Resolver::mutate`].
    ///
    /// # Panics
    ///
    /// Panics if the entry's value kind does not match the property's kind.
    pub fn mutate_entry(
        &self,
        style: &TextStyle,
        property: PropertyId,
        entry: ValueEntry,
    ) -> TextStyle {
        if !entry.has_value() || style.entry(property) == &entry {
            return style.clone();
        }

        self.mutate
            .get_or_compute((style.clone(), property, entry), |(origin, property, entry)| {
                mutate_style(origin, *property, entry, true)
            })
    }

    /// Fills the properties `style` leaves unset from `parent`.
    ///
    /// Values `style` defines win, font family included. The fallback is inherited when `style` has none, and the
    /// resulting fallback chain is then re-derived from the merged style.
    pub fn apply_inherited_style(&self, style: &TextStyle, parent: &TextStyle) -> TextStyle {
        let resolved = self
            .inherited
            .get_or_compute((style.clone(), parent.clone()), |(style, parent)| {
                let merged = merge(style, parent, ApplyOptions::INHERIT);
                update_font_fallback(&merged, true, 0)
            });
        unchanged_or(style, resolved)
    }

    /// Backstops every unset property with [`TextStyle::library_default`].
    ///
    /// Afterwards every property except the fallback is defined, on the
    /// style and on each style of its fallback chain.
    pub fn apply_global_style(&self, style: &TextStyle) -> TextStyle {
        let resolved = self.global.get_or_compute(style.clone(), |style| {
            let merged = merge(style, &TextStyle::library_default(), ApplyOptions::GLOBAL);
            update_font_fallback(&merged, false, 0)
        });
        unchanged_or(style, resolved)
    }

    /// Replaces every property `parent` defines, font family and fallback
    /// included.
    pub fn override_style(&self, style: &TextStyle, parent: &TextStyle) -> TextStyle {
        let resolved = self
            .overridden
            .get_or_compute((style.clone(), parent.clone()), |(style, parent)| {
                merge(style, parent, ApplyOptions::OVERRIDE)
            });
        unchanged_or(style, resolved)
    }

    /// Reports how many results each cache holds.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            mutate: self.mutate.len(),
            inherited: self.inherited.len(),
            global: self.global.len(),
            overridden: self.overridden.len(),
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{properties, FontWeight};

    fn chain(depth: usize) -> TextStyle {
        let mut style = TextStyle::new().with_font_family("Leaf");
        for _ in 0..depth {
            style = TextStyle::new().with_entry(PropertyId::Fallback, ValueEntry::present(style));
        }
        style
    }

    #[test]
    fn test_mutate_sets_value() {
        let resolver = Resolver::new();
        let style = resolver.mutate(&TextStyle::new(), properties::SIZE, Some(16.0));
        assert_eq!(style.size(), Some(16.0));
        assert_eq!(resolver.stats().mutate, 1);
    }

    #[test]
    fn test_mutate_none_keeps_existing_value() {
        let resolver = Resolver::new();
        let style = TextStyle::new().with_color("#222222");
        let result = resolver.mutate(&style, properties::COLOR, None);
        assert!(result.ptr_eq(&style));
        assert_eq!(resolver.stats().mutate, 0);
    }

    #[test]
    fn test_mutate_same_value_returns_same_instance() {
        let resolver = Resolver::new();
        let style = TextStyle::new().bold();
        let result = resolver.mutate(&style, properties::FONT_WEIGHT, Some(FontWeight::Bold));
        assert!(result.ptr_eq(&style));
    }

    #[test]
    fn test_mutate_overrides_existing_value() {
        let resolver = Resolver::new();
        let style = TextStyle::new().with_size(10.0);
        let result = resolver.mutate(&style, properties::SIZE, Some(20.0));
        assert_eq!(result.size(), Some(20.0));
        assert_eq!(style.size(), Some(10.0));
    }

    #[test]
    fn test_repeated_mutate_hits_cache() {
        let resolver = Resolver::new();
        let style = TextStyle::new();
        let first = resolver.mutate(&style, properties::IS_ITALIC, Some(true));
        let second = resolver.mutate(&style, properties::IS_ITALIC, Some(true));
        assert!(first.ptr_eq(&second));
        assert_eq!(resolver.stats().mutate, 1);
    }

    #[test]
    fn test_merge_without_override_keeps_child_values() {
        let style = TextStyle::new().with_size(10.0);
        let parent = TextStyle::new().with_size(20.0).with_color("#333333");
        let merged = merge(&style, &parent, ApplyOptions::INHERIT);
        assert_eq!(merged.size(), Some(10.0));
        assert_eq!(merged.color(), Some("#333333"));
    }

    #[test]
    fn test_merge_unchanged_returns_same_instance() {
        let style = TextStyle::new().with_size(10.0);
        let merged = merge(&style, &TextStyle::new(), ApplyOptions::OVERRIDE);
        assert!(merged.ptr_eq(&style));
    }

    #[test]
    fn test_merge_keeps_whitespace_font_family_without_override() {
        let style = TextStyle::new().with_font_family("   ");
        let parent = TextStyle::new().with_font_family("Times");
        let merged = merge(&style, &parent, ApplyOptions::INHERIT);
        assert_eq!(merged.font_family(), Some("   "));
        assert!(merged.ptr_eq(&style));
    }

    #[test]
    fn test_merge_fills_unset_font_family() {
        let style = TextStyle::new().with_size(10.0);
        let parent = TextStyle::new().with_font_family("Times");
        let merged = merge(&style, &parent, ApplyOptions::INHERIT);
        assert_eq!(merged.font_family(), Some("Times"));
    }

    #[test]
    fn test_merge_whitespace_font_family_is_eligible_under_override() {
        let style = TextStyle::new().with_font_family("   ");
        let parent = TextStyle::new().with_font_family("Times");
        let options = ApplyOptions {
            override_style: true,
            override_font_family: false,
            allow_fallback: true,
        };
        assert_eq!(merge(&style, &parent, options).font_family(), Some("Times"));
    }

    #[test]
    fn test_global_keeps_present_blank_font_family() {
        let resolver = Resolver::new();
        let resolved = resolver.apply_global_style(&TextStyle::new().with_font_family("  "));
        assert_eq!(resolved.font_family(), Some("  "));
        assert_eq!(resolved.size(), Some(12.0));
    }

    #[test]
    fn test_global_fallback_keeps_present_empty_font_family() {
        let resolver = Resolver::new();
        let style = TextStyle::new()
            .with_font_family("Inter")
            .with_fallback(TextStyle::new().with_font_family(""));

        let resolved = resolver.apply_global_style(&style);
        let fallback = resolved.fallback().expect("fallback kept");
        assert_eq!(fallback.font_family(), Some(""));
        assert_eq!(fallback.size(), Some(12.0));
    }

    #[test]
    fn test_merge_keeps_blank_font_family_when_parent_has_none() {
        let style = TextStyle::new().with_font_family("");
        let merged = merge(&style, &TextStyle::new(), ApplyOptions::INHERIT);
        assert_eq!(merged.font_family(), Some(""));
    }

    #[test]
    fn test_merge_font_family_override_flag() {
        let style = TextStyle::new().with_font_family("Arial");
        let parent = TextStyle::new().with_font_family("Times");

        let options = ApplyOptions {
            override_style: true,
            override_font_family: false,
            allow_fallback: true,
        };
        assert_eq!(merge(&style, &parent, options).font_family(), Some("Arial"));

        let options = ApplyOptions {
            override_font_family: true,
            ..options
        };
        assert_eq!(merge(&style, &parent, options).font_family(), Some("Times"));
    }

    #[test]
    fn test_merge_respects_allow_fallback() {
        let fallback = TextStyle::new().with_font_family("Noto Emoji");
        let parent = TextStyle::new().with_fallback(fallback.clone());

        let blocked = ApplyOptions {
            allow_fallback: false,
            ..ApplyOptions::OVERRIDE
        };
        assert!(merge(&TextStyle::new(), &parent, blocked).fallback().is_none());
        assert_eq!(
            merge(&TextStyle::new(), &parent, ApplyOptions::OVERRIDE).fallback(),
            Some(&fallback)
        );
    }

    #[test]
    fn test_inherited_pulls_fallback_and_propagates_values() {
        let resolver = Resolver::new();
        let emoji = TextStyle::new().with_font_family("Noto Emoji");
        let parent = TextStyle::new().with_fallback(emoji);
        let style = TextStyle::new()
            .with_font_family("Inter")
            .with_color("#ff0000")
            .with_size(10.0);

        let resolved = resolver.apply_inherited_style(&style, &parent);
        let fallback = resolved.fallback().expect("fallback inherited");

        assert_eq!(fallback.font_family(), Some("Noto Emoji"));
        assert_eq!(fallback.color(), Some("#ff0000"));
        assert_eq!(fallback.size(), Some(10.0));
        assert!(fallback.fallback().is_none());
    }

    #[test]
    fn test_inherited_fallback_update_overrides_fallback_values() {
        let resolver = Resolver::new();
        let fallback = TextStyle::new().with_font_family("Noto Emoji").with_size(30.0);
        let style = TextStyle::new().with_size(10.0).with_fallback(fallback);

        let resolved = resolver.apply_inherited_style(&style, &TextStyle::new());
        let fallback = resolved.fallback().expect("fallback kept");
        assert_eq!(fallback.size(), Some(10.0));
        assert_eq!(fallback.font_family(), Some("Noto Emoji"));
    }

    #[test]
    fn test_inherited_fallback_takes_blank_font_family_from_style() {
        let resolver = Resolver::new();
        let style = TextStyle::new()
            .with_font_family("Inter")
            .with_fallback(TextStyle::new().bold());

        let resolved = resolver.apply_inherited_style(&style, &TextStyle::new());
        let fallback = resolved.fallback().expect("fallback kept");
        assert_eq!(fallback.font_family(), Some("Inter"));
        assert_eq!(fallback.font_weight(), Some(FontWeight::Bold));
    }

    #[test]
    fn test_fallback_propagates_through_every_link() {
        let resolver = Resolver::new();
        let last = TextStyle::new().with_font_family("Last");
        let middle = TextStyle::new()
            .with_font_family("Middle")
            .with_fallback(last);
        let style = TextStyle::new()
            .with_color("#00ff00")
            .with_fallback(middle);

        let resolved = resolver.apply_inherited_style(&style, &TextStyle::new());
        let middle = resolved.fallback().expect("first link");
        let last = middle.fallback().expect("second link");

        assert_eq!(middle.color(), Some("#00ff00"));
        assert_eq!(last.color(), Some("#00ff00"));
        assert_eq!(middle.font_family(), Some("Middle"));
        assert_eq!(last.font_family(), Some("Last"));
    }

    #[test]
    fn test_global_fallback_update_keeps_fallback_values() {
        let resolver = Resolver::new();
        let fallback = TextStyle::new().with_font_family("Noto Emoji").with_size(30.0);
        let style = TextStyle::new().with_size(10.0).with_fallback(fallback);

        let resolved = resolver.apply_global_style(&style);
        let fallback = resolved.fallback().expect("fallback kept");
        assert_eq!(fallback.size(), Some(30.0));
        assert_eq!(fallback.color(), Some(crate::colors::BLACK));
        assert_eq!(fallback.line_height(), Some(1.2));
    }

    #[test]
    fn test_global_on_empty_style_equals_library_default() {
        let resolver = Resolver::new();
        let resolved = resolver.apply_global_style(&TextStyle::new());
        assert_eq!(resolved, TextStyle::library_default());
    }

    #[test]
    fn test_override_replaces_defined_values_only() {
        let resolver = Resolver::new();
        let style = TextStyle::new().with_size(10.0).with_color("#111111");
        let parent = TextStyle::new().with_size(20.0);

        let resolved = resolver.override_style(&style, &parent);
        assert_eq!(resolved.size(), Some(20.0));
        assert_eq!(resolved.color(), Some("#111111"));
    }

    #[test]
    fn test_override_replaces_fallback() {
        let resolver = Resolver::new();
        let old = TextStyle::new().with_font_family("Old");
        let new = TextStyle::new().with_font_family("New");
        let style = TextStyle::new().with_fallback(old);
        let parent = TextStyle::new().with_fallback(new.clone());

        let resolved = resolver.override_style(&style, &parent);
        assert_eq!(resolved.fallback(), Some(&new));
    }

    #[test]
    fn test_override_does_not_rederive_fallback_chain() {
        let resolver = Resolver::new();
        let fallback = TextStyle::new().with_font_family("Noto Emoji");
        let style = TextStyle::new().with_size(10.0).with_color("#abcdef");
        let parent = TextStyle::new().with_fallback(fallback.clone());

        let resolved = resolver.override_style(&style, &parent);
        let pulled = resolved.fallback().expect("fallback from parent");
        assert_eq!(resolved.size(), Some(10.0));
        assert_eq!(pulled, &fallback);
        assert_eq!(pulled.size(), None);
        assert_eq!(pulled.color(), None);
    }

    #[test]
    fn test_no_op_returns_receiver_when_equal_instance_was_cached() {
        let resolver = Resolver::new();
        let size = ValueEntry::present(30.0f32);
        let a = TextStyle::library_default().with_entry(PropertyId::Size, size.clone());
        let b = TextStyle::library_default().with_entry(PropertyId::Size, size);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));

        assert!(resolver.apply_global_style(&a).ptr_eq(&a));
        assert!(resolver.apply_global_style(&b).ptr_eq(&b));

        let parent = TextStyle::new().with_size(30.0);
        assert!(resolver.apply_inherited_style(&a, &parent).ptr_eq(&a));
        assert!(resolver.apply_inherited_style(&b, &parent).ptr_eq(&b));
        assert!(resolver.override_style(&a, &parent).ptr_eq(&a));
        assert!(resolver.override_style(&b, &parent).ptr_eq(&b));
    }

    #[test]
    fn test_stats_track_each_table() {
        let resolver = Resolver::new();
        let style = TextStyle::new().with_size(10.0);
        let parent = TextStyle::new().with_color("#444444");

        resolver.apply_inherited_style(&style, &parent);
        resolver.apply_inherited_style(&style, &parent);
        resolver.apply_global_style(&style);
        resolver.override_style(&style, &parent);

        let stats = resolver.stats();
        assert_eq!(stats.inherited, 1);
        assert_eq!(stats.global, 1);
        assert_eq!(stats.overridden, 1);
        assert_eq!(stats.mutate, 0);
    }

    #[test]
    fn test_chain_at_depth_limit_resolves() {
        let resolver = Resolver::new();
        let style = chain(MAX_FALLBACK_DEPTH).with_color("#123456");
        let resolved = resolver.apply_inherited_style(&style, &TextStyle::new());

        let mut current = resolved.fallback();
        let mut links = 0;
        while let Some(link) = current {
            assert_eq!(link.color(), Some("#123456"));
            links += 1;
            current = link.fallback();
        }
        assert_eq!(links, MAX_FALLBACK_DEPTH);
    }

    #[test]
    #[should_panic(expected = "invalid fallback chain")]
    fn test_chain_beyond_depth_limit_fails_fast() {
        let resolver = Resolver::new();
        resolver.apply_global_style(&chain(MAX_FALLBACK_DEPTH + 1));
    }

    #[test]
    fn test_options_serde() {
        let json = serde_json::to_string(&ApplyOptions::OVERRIDE).unwrap();
        assert!(json.contains("\"override-font-family\":true"));
        let back: ApplyOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ApplyOptions::OVERRIDE);
    }
}
