//! # Variant-Aware Theme Randomizer
//!
//! Turns a template into a new theme whose slot values are random but whose
//! overall character matches the requested [Variant]: dark themes get dark
//! opaque backgrounds and dark-biased colors, light themes the opposite.
//!
//! ## Sampling
//!
//! Each value is drawn through the [SamplingPolicy] table:
//!
//! | slot     | channel | distribution                                        |
//! |----------|---------|-----------------------------------------------------|
//! | surface  | alpha   | 95% `[0.85, 1.0]`, else `[0.60, 0.85]`              |
//! | ordinary | alpha   | 80% `[0.70, 1.0]`, else `[0.0, 0.70]`               |
//! | any      | color   | light: 99% `[0.4, 1.0]`; dark: 99% `[0.0, 0.6]`     |
//! | surface  | r, g, b | 99.5% jointly light `[0.7, 1.0]` / dark `[0.0, 0.3]`, else per channel |
//!
//! The template's values are never read, only its slot names and shapes.
//! Slots holding anything other than a channel record (numbers, strings,
//! flags) are resampled as a single color value.
//!
//! ## Usage
//!
//! ```rust
//! use imtheme_core::randomizer::Randomizer;
//! use imtheme_theme::id::ThemeIdentity;
//! use imtheme_theme::theme::{Theme, Variant};
//! use rand::SeedableRng;
//!
//! let template = Theme::from_json_template(r#"{"imgui": {
//!     "ImGuiCol_WindowBg": {"r": 0.1, "g": 0.1, "b": 0.1, "a": 1.0}
//! }}"#).unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(3);
//! let theme = Randomizer::new()
//!     .randomize(&template, Variant::Dark, &ThemeIdentity::from(4821), &mut rng)
//!     .unwrap();
//!
//! assert_eq!(theme.metadata.name.as_deref(), Some("Random 4821"));
//! assert!(theme.same_slots(&template));
//! ```

use imtheme_theme::color::{check_channel, Channel, Rgba, SlotValue};
use imtheme_theme::config::DEFAULT_AUTHOR;
use imtheme_theme::error::{ThemeError, ThemeResult};
use imtheme_theme::id::ThemeIdentity;
use imtheme_theme::slot::SlotClass;
use imtheme_theme::theme::{Appearance, Metadata, Theme, Variant};
use rand::Rng;

mod policy;

pub use policy::{chance, BiasedRange, Bucket, ChannelClass, JointRange, SamplingPolicy};

/// Derives randomized themes from templates.
#[derive(Debug, Clone)]
pub struct Randomizer {
    policy: SamplingPolicy,
    author: String,
}

impl Randomizer {
    /// A randomizer with the standard policy and the default attribution.
    pub fn new() -> Self {
        Self {
            policy: SamplingPolicy::standard(),
            author: DEFAULT_AUTHOR.to_string(),
        }
    }

    /// Use a different attribution in generated metadata.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Use a different policy table.
    ///
    /// Fails with a configuration error if the table has a bucket that cannot
    /// be sampled or a probability outside `[0.0, 1.0]`.
    pub fn with_policy(mut self, policy: SamplingPolicy) -> ThemeResult<Self> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    /// The policy table in use.
    pub fn policy(&self) -> &SamplingPolicy {
        &self.policy
    }

    /// The attribution written into generated metadata.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Produce a new theme with the template's slots, resampled for `variant`.
    ///
    /// Fails with a template error if the template has no slots or holds a
    /// record lacking one of `r`, `g`, `b`, and with a range error if a drawn
    /// value escapes `[0.0, 1.0]`. Either way nothing is
    /// returned; there is no partially randomized theme.
    pub fn randomize<R: Rng + ?Sized>(
        &self,
        template: &Theme,
        variant: Variant,
        identity: &ThemeIdentity,
        rng: &mut R,
    ) -> ThemeResult<Theme> {
        template.ensure_template()?;

        let mut imgui = Appearance::with_capacity(template.imgui.len());
        for (slot, value) in &template.imgui {
            let sampled = match value {
                SlotValue::Color(_) => SlotValue::Color(self.sample_color(slot, variant, rng)?),
                SlotValue::Other(_) if value.is_malformed_record() => {
                    return Err(ThemeError::template(format!(
                        "slot '{}' is a record without 'r', 'g' and 'b' channels",
                        slot
                    )));
                },
                SlotValue::Scalar(_) | SlotValue::Other(_) => {
                    SlotValue::Scalar(self.sample_scalar(slot, variant, rng)?)
                },
            };
            imgui.insert(slot.clone(), sampled);
        }

        let metadata = Metadata::generated(format!("Random {}", identity), self.author.clone(), variant);
        log::debug!(
            "Randomized {} slots into {:?} ({})",
            imgui.len(),
            metadata.name,
            variant
        );
        Ok(Theme::new(metadata, imgui))
    }

    fn sample_color<R: Rng + ?Sized>(
        &self,
        slot: &str,
        variant: Variant,
        rng: &mut R,
    ) -> ThemeResult<Rgba> {
        let class = SlotClass::of(slot);
        let mut rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

        let joint = self.policy.surface_joint(variant);
        if class.is_surface() && chance(rng, joint.probability) {
            for channel in Channel::COLOR {
                rgba.set(channel, joint.bucket.sample(rng));
            }
        } else {
            let range = self.policy.channel(class, ChannelClass::Color, variant);
            for channel in Channel::COLOR {
                rgba.set(channel, range.sample(rng));
            }
        }

        let alpha = self.policy.channel(class, ChannelClass::Alpha, variant);
        rgba.set(Channel::A, alpha.sample(rng));

        rgba.checked(slot)
    }

    fn sample_scalar<R: Rng + ?Sized>(
        &self,
        slot: &str,
        variant: Variant,
        rng: &mut R,
    ) -> ThemeResult<f32> {
        let range = self
            .policy
            .channel(SlotClass::Ordinary, ChannelClass::Color, variant);
        check_channel(slot, None, range.sample(rng))
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Randomize `template` with the standard policy and default attribution.
pub fn randomize<R: Rng + ?Sized>(
    template: &Theme,
    variant: Variant,
    identity: &ThemeIdentity,
    rng: &mut R,
) -> ThemeResult<Theme> {
    Randomizer::new().randomize(template, variant, identity, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imtheme_theme::slot::SURFACE_SLOTS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCENARIO: &str = r#"{"imgui": {
        "ImGuiCol_WindowBg": {"r": 0.1, "g": 0.1, "b": 0.1, "a": 1.0},
        "ImGuiCol_Text": {"r": 0.9, "g": 0.9, "b": 0.9, "a": 1.0}
    }}"#;

    fn full_template() -> Theme {
        let mut imgui = Appearance::new();
        for slot in SURFACE_SLOTS {
            imgui.insert(slot.to_string(), Rgba::new(0.5, 0.5, 0.5, 1.0).into());
        }
        for slot in ["ImGuiCol_Text", "ImGuiCol_Button", "ImGuiCol_Border", "ImGuiCol_FrameBg"] {
            imgui.insert(slot.to_string(), Rgba::new(0.5, 0.5, 0.5, 0.5).into());
        }
        imgui.insert("ImGuiStyle_Alpha".to_string(), SlotValue::Scalar(1.0));
        Theme::new(Metadata::default(), imgui)
    }

    fn color(theme: &Theme, slot: &str) -> Rgba {
        *theme.imgui[slot].as_color().unwrap()
    }

    #[test]
    fn test_slot_set_and_order_preserved() {
        let template = full_template();
        let mut rng = StdRng::seed_from_u64(11);
        for variant in [Variant::Dark, Variant::Light] {
            let theme = randomize(&template, variant, &ThemeIdentity::from(1000), &mut rng).unwrap();
            assert!(theme.slots().eq(template.slots()));
            assert!(matches!(theme.imgui["ImGuiStyle_Alpha"], SlotValue::Scalar(_)));
        }
    }

    #[test]
    fn test_every_value_in_unit_range() {
        let template = full_template();
        let mut rng = StdRng::seed_from_u64(12);
        for i in 0..500 {
            let variant = if i % 2 == 0 { Variant::Dark } else { Variant::Light };
            let theme = randomize(&template, variant, &ThemeIdentity::from(i), &mut rng).unwrap();
            for value in theme.imgui.values() {
                match value {
                    SlotValue::Color(rgba) => assert!(rgba.in_range(), "{rgba:?}"),
                    SlotValue::Scalar(v) => assert!((0.0..=1.0).contains(v)),
                    SlotValue::Other(other) => panic!("unexpected raw value {other}"),
                }
            }
        }
    }

    #[test]
    fn test_metadata_is_generated() {
        let template = Theme::from_json_template(SCENARIO).unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let theme = Randomizer::new()
            .with_author("someone")
            .randomize(&template, Variant::Light, &ThemeIdentity::from(7777), &mut rng)
            .unwrap();

        let metadata = &theme.metadata;
        assert_eq!(metadata.name.as_deref(), Some("Random 7777"));
        assert_eq!(metadata.author.as_deref(), Some("someone"));
        assert_eq!(metadata.variant, Some(Variant::Light));
        assert!(metadata.description.as_deref().unwrap().contains("light"));
        assert!(metadata.extra.is_empty());
    }

    #[test]
    fn test_dark_surface_bias() {
        let template = Theme::from_json_template(SCENARIO).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let n = 2000;
        let mut dark_bg = 0;
        let mut opaque_bg = 0;
        let mut dark_text = 0;
        for i in 0..n {
            let theme = randomize(&template, Variant::Dark, &ThemeIdentity::from(i), &mut rng).unwrap();
            let bg = color(&theme, "ImGuiCol_WindowBg");
            if Channel::COLOR.iter().all(|&c| bg.get(c) <= 0.3) {
                dark_bg += 1;
            }
            if bg.a >= 0.85 {
                opaque_bg += 1;
            }
            let text = color(&theme, "ImGuiCol_Text");
            if text.r <= 0.6 {
                dark_text += 1;
            }
        }
        assert!(dark_bg as f64 / n as f64 >= 0.90, "dark backgrounds: {dark_bg}/{n}");
        assert!(opaque_bg as f64 / n as f64 >= 0.90, "opaque backgrounds: {opaque_bg}/{n}");
        assert!(dark_text as f64 / n as f64 >= 0.95, "dark text: {dark_text}/{n}");
    }

    #[test]
    fn test_light_surface_bias() {
        let template = Theme::from_json_template(SCENARIO).unwrap();
        let mut rng = StdRng::seed_from_u64(22);
        let n = 2000;
        let light_bg = (0..n)
            .filter(|&i| {
                let theme =
                    randomize(&template, Variant::Light, &ThemeIdentity::from(i), &mut rng).unwrap();
                color(&theme, "ImGuiCol_WindowBg").r >= 0.7
            })
            .count();
        assert!(light_bg as f64 / n as f64 >= 0.90, "light backgrounds: {light_bg}/{n}");
    }

    #[test]
    fn test_surface_alpha_is_never_below_fallback_bucket() {
        let template = full_template();
        let mut rng = StdRng::seed_from_u64(23);
        for i in 0..1000 {
            let theme = randomize(&template, Variant::Dark, &ThemeIdentity::from(i), &mut rng).unwrap();
            for slot in SURFACE_SLOTS {
                assert!(color(&theme, slot).a >= 0.60);
            }
        }
    }

    #[test]
    fn test_same_shape_different_values() {
        let template = full_template();
        let mut rng = StdRng::seed_from_u64(31);
        let id = ThemeIdentity::from(1234);
        let first = randomize(&template, Variant::Dark, &id, &mut rng).unwrap();
        let second = randomize(&template, Variant::Dark, &id, &mut rng).unwrap();
        assert!(first.same_slots(&second));
        assert_ne!(first.imgui, second.imgui);
    }

    #[test]
    fn test_fixed_seed_reproduces() {
        let template = full_template();
        let id = ThemeIdentity::from(1234);
        let a = randomize(&template, Variant::Light, &id, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = randomize(&template, Variant::Light, &id, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_template_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = randomize(&Theme::default(), Variant::Dark, &ThemeIdentity::from(1), &mut rng)
            .unwrap_err();
        assert!(matches!(err, ThemeError::Template { .. }));
    }

    #[test]
    fn test_broken_policy_surfaces_range_error() {
        let mut policy = SamplingPolicy::standard();
        policy.dark_color = BiasedRange::new(1.0, Bucket::new(1.5, 2.0), Bucket::new(1.5, 2.0));
        policy.dark_surface.probability = 1.0;
        let template = Theme::from_json_template(SCENARIO).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let err = Randomizer::new()
            .with_policy(policy)
            .unwrap()
            .randomize(&template, Variant::Dark, &ThemeIdentity::from(1), &mut rng)
            .unwrap_err();
        match err {
            ThemeError::Range { slot, .. } => assert_eq!(slot, "ImGuiCol_Text"),
            other => panic!("unexpected error: {other}"),
        }
    }

    fn scalar(theme: &Theme, slot: &str) -> f32 {
        match theme.imgui[slot] {
            SlotValue::Scalar(value) => value,
            ref other => panic!("{slot} is not a scalar: {other:?}"),
        }
    }

    fn fraction(hits: usize, n: usize) -> f64 {
        hits as f64 / n as f64
    }

    #[test]
    fn test_ordinary_alpha_bias() {
        let template = Theme::from_json_template(SCENARIO).unwrap();
        let mut rng = StdRng::seed_from_u64(24);
        let n = 2000;
        let mut likely = 0;
        for i in 0..n {
            let variant = if i % 2 == 0 { Variant::Dark } else { Variant::Light };
            let theme = randomize(&template, variant, &ThemeIdentity::from(i), &mut rng).unwrap();
            if color(&theme, "ImGuiCol_Text").a >= 0.70 {
                likely += 1;
            }
        }
        let ratio = fraction(likely, n as usize);
        assert!((0.75..0.85).contains(&ratio), "opaque text: {likely}/{n}");
    }

    #[test]
    fn test_light_ordinary_color_bias() {
        let template = Theme::from_json_template(SCENARIO).unwrap();
        let mut rng = StdRng::seed_from_u64(25);
        let n = 1000;
        let mut channels = 0;
        let mut light = 0;
        for i in 0..n {
            let theme = randomize(&template, Variant::Light, &ThemeIdentity::from(i), &mut rng).unwrap();
            let text = color(&theme, "ImGuiCol_Text");
            for channel in Channel::COLOR {
                channels += 1;
                if text.get(channel) >= 0.4 {
                    light += 1;
                }
            }
        }
        assert!(fraction(light, channels) >= 0.97, "light channels: {light}/{channels}");
    }

    #[test]
    fn test_surface_fallback_uses_per_channel_rule() {
        let mut policy = SamplingPolicy::standard();
        policy.dark_surface.probability = 0.0;
        let randomizer = Randomizer::new().with_policy(policy).unwrap();
        let template = Theme::from_json_template(SCENARIO).unwrap();
        let mut rng = StdRng::seed_from_u64(26);

        let n = 1000;
        let mut channels = 0;
        let mut in_dark_bucket = 0;
        let mut above_joint_bucket = 0;
        for i in 0..n {
            let theme = randomizer
                .randomize(&template, Variant::Dark, &ThemeIdentity::from(i), &mut rng)
                .unwrap();
            let bg = color(&theme, "ImGuiCol_WindowBg");
            assert!(bg.a >= 0.60, "surface alpha {}", bg.a);
            for channel in Channel::COLOR {
                let value = bg.get(channel);
                channels += 1;
                if value <= 0.6 {
                    in_dark_bucket += 1;
                }
                if value > 0.3 {
                    above_joint_bucket += 1;
                }
            }
        }
        assert!(fraction(in_dark_bucket, channels) >= 0.97, "{in_dark_bucket}/{channels}");
        // Uniform over [0, 0.6] puts about half of the values above 0.3.
        assert!(fraction(above_joint_bucket, channels) >= 0.4, "{above_joint_bucket}/{channels}");
    }

    #[test]
    fn test_scalar_slots_follow_variant() {
        let template = Theme::from_json_template(
            r#"{"imgui": {"ImGuiStyle_Alpha": 1.0, "ImGuiStyle_Label": "wide"}}"#,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(27);
        let n = 1000;
        let mut dark_hits = 0;
        let mut light_hits = 0;
        for i in 0..n {
            let id = ThemeIdentity::from(i);
            let dark = randomize(&template, Variant::Dark, &id, &mut rng).unwrap();
            if scalar(&dark, "ImGuiStyle_Alpha") <= 0.6 && scalar(&dark, "ImGuiStyle_Label") <= 0.6 {
                dark_hits += 1;
            }
            let light = randomize(&template, Variant::Light, &id, &mut rng).unwrap();
            if scalar(&light, "ImGuiStyle_Alpha") >= 0.4 && scalar(&light, "ImGuiStyle_Label") >= 0.4 {
                light_hits += 1;
            }
        }
        assert!(fraction(dark_hits, n as usize) >= 0.95, "dark scalars: {dark_hits}/{n}");
        assert!(fraction(light_hits, n as usize) >= 0.95, "light scalars: {light_hits}/{n}");
    }

    #[test]
    fn test_lenient_template_metadata_is_randomized() {
        let template = Theme::from_json_template(
            r#"{"metadata": {"variant": "both", "name": 5}, "imgui": {
                "ImGuiCol_Text": {"r": 0.9, "g": 0.9, "b": 0.9}
            }}"#,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(28);
        let theme = randomize(&template, Variant::Dark, &ThemeIdentity::from(4242), &mut rng).unwrap();
        assert_eq!(theme.metadata.name.as_deref(), Some("Random 4242"));
        assert_eq!(theme.metadata.variant, Some(Variant::Dark));
    }

    #[test]
    fn test_partial_record_is_template_error() {
        let template = Theme::from_json_template(
            r#"{"imgui": {"ImGuiCol_Text": {"r": 0.9, "a": 1.0}}}"#,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(29);
        let err = randomize(&template, Variant::Dark, &ThemeIdentity::from(1), &mut rng).unwrap_err();
        assert!(matches!(err, ThemeError::Template { .. }), "{err}");
    }

    #[test]
    fn test_unsampleable_policy_is_rejected() {
        let mut policy = SamplingPolicy::standard();
        policy.surface_alpha.likely = Bucket::new(1.0, 0.85);
        let err = Randomizer::new().with_policy(policy).unwrap_err();
        assert!(matches!(err, ThemeError::Config { .. }));
    }
}
