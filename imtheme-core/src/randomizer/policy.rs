//! The sampling policy table.
//!
//! Every resampled value is drawn from a [BiasedRange]: with some probability
//! from a likely bucket, otherwise from an unlikely one. Which range applies is
//! decided by the slot class, the channel class and the variant. Surface slots
//! additionally get a [JointRange] for their color channels.

use imtheme_theme::error::{ThemeError, ThemeResult};
use imtheme_theme::slot::SlotClass;
use imtheme_theme::theme::Variant;
use rand::Rng;

/// Whether a value is an opacity or a color component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelClass {
    /// `r`, `g`, `b`, or a scalar slot.
    Color,
    /// `a`.
    Alpha,
}

/// A closed interval values are drawn from uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    /// Lower bound, inclusive.
    pub low: f32,
    /// Upper bound, inclusive.
    pub high: f32,
}

impl Bucket {
    /// Create a bucket. `low` must not exceed `high`.
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Returns `true` if `value` lies in the bucket.
    pub fn contains(&self, value: f32) -> bool {
        (self.low..=self.high).contains(&value)
    }

    /// Returns `true` if both bounds are finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low <= self.high
    }

    /// Draw a value uniformly from the bucket.
    ///
    /// # Panics
    ///
    /// Panics if the bucket is not [valid](Bucket::is_valid).
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.low..=self.high)
    }
}

/// Draw one uniform value and compare it against `probability`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}

/// A two-bucket distribution: `likely` with `probability`, `unlikely` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasedRange {
    /// Probability of drawing from `likely`.
    pub probability: f64,
    /// The bucket the policy favors.
    pub likely: Bucket,
    /// The rare alternative.
    pub unlikely: Bucket,
}

impl BiasedRange {
    /// Create a biased range.
    pub const fn new(probability: f64, likely: Bucket, unlikely: Bucket) -> Self {
        Self {
            probability,
            likely,
            unlikely,
        }
    }

    /// Pick a bucket, then draw from it.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if chance(rng, self.probability) {
            self.likely.sample(rng)
        } else {
            self.unlikely.sample(rng)
        }
    }
}

/// Joint sampling of a surface's color channels.
///
/// With `probability` all of `r`, `g` and `b` are drawn from `bucket`,
/// otherwise every channel falls back to its ordinary [BiasedRange].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointRange {
    /// Probability of drawing all three channels from `bucket`.
    pub probability: f64,
    /// The bucket shared by the three color channels.
    pub bucket: Bucket,
}

/// The full policy table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingPolicy {
    /// Alpha of surface slots.
    pub surface_alpha: BiasedRange,
    /// Alpha of every other slot.
    pub ordinary_alpha: BiasedRange,
    /// Color channels for light themes.
    pub light_color: BiasedRange,
    /// Color channels for dark themes.
    pub dark_color: BiasedRange,
    /// Joint surface color for light themes.
    pub light_surface: JointRange,
    /// Joint surface color for dark themes.
    pub dark_surface: JointRange,
}

impl SamplingPolicy {
    /// The standard policy.
    pub const fn standard() -> Self {
        Self {
            surface_alpha: BiasedRange::new(0.95, Bucket::new(0.85, 1.0), Bucket::new(0.60, 0.85)),
            ordinary_alpha: BiasedRange::new(0.80, Bucket::new(0.70, 1.0), Bucket::new(0.0, 0.70)),
            light_color: BiasedRange::new(0.99, Bucket::new(0.4, 1.0), Bucket::new(0.0, 0.4)),
            dark_color: BiasedRange::new(0.99, Bucket::new(0.0, 0.6), Bucket::new(0.6, 1.0)),
            light_surface: JointRange {
                probability: 0.995,
                bucket: Bucket::new(0.7, 1.0),
            },
            dark_surface: JointRange {
                probability: 0.995,
                bucket: Bucket::new(0.0, 0.3),
            },
        }
    }

    /// The per-value distribution for a slot class, channel class and variant.
    ///
    /// Color channels do not depend on the slot class here; surface slots only
    /// reach this range through the fallback of [SamplingPolicy::surface_joint].
    pub fn channel(&self, slot: SlotClass, channel: ChannelClass, variant: Variant) -> BiasedRange {
        match (channel, slot) {
            (ChannelClass::Alpha, SlotClass::Surface) => self.surface_alpha,
            (ChannelClass::Alpha, SlotClass::Ordinary) => self.ordinary_alpha,
            (ChannelClass::Color, _) => match variant {
                Variant::Light => self.light_color,
                Variant::Dark => self.dark_color,
            },
        }
    }

    /// The joint color distribution of surface slots.
    pub fn surface_joint(&self, variant: Variant) -> JointRange {
        match variant {
            Variant::Light => self.light_surface,
            Variant::Dark => self.dark_surface,
        }
    }

    /// Check that every bucket can be sampled and every probability lies in
    /// `[0.0, 1.0]`.
    ///
    /// Buckets reaching outside `[0.0, 1.0]` pass here; the values they
    /// produce are rejected as range errors when a theme is generated.
    pub fn validate(&self) -> ThemeResult<()> {
        let biased = [
            ("surface_alpha", self.surface_alpha),
            ("ordinary_alpha", self.ordinary_alpha),
            ("light_color", self.light_color),
            ("dark_color", self.dark_color),
        ];
        for (name, range) in biased {
            check_probability(name, range.probability)?;
            check_bucket(name, range.likely)?;
            check_bucket(name, range.unlikely)?;
        }
        for (name, joint) in [("light_surface", self.light_surface), ("dark_surface", self.dark_surface)] {
            check_probability(name, joint.probability)?;
            check_bucket(name, joint.bucket)?;
        }
        Ok(())
    }

    /// Every bucket in the table, for bounds checks.
    pub fn buckets(&self) -> impl Iterator<Item = Bucket> {
        let ranges = [
            self.surface_alpha,
            self.ordinary_alpha,
            self.light_color,
            self.dark_color,
        ];
        ranges
            .into_iter()
            .flat_map(|range| [range.likely, range.unlikely])
            .chain([self.light_surface.bucket, self.dark_surface.bucket])
    }
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_probability(name: &str, probability: f64) -> ThemeResult<()> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(ThemeError::config(format!(
            "policy entry '{}' has probability {} outside [0, 1]",
            name, probability
        )))
    }
}

fn check_bucket(name: &str, bucket: Bucket) -> ThemeResult<()> {
    if bucket.is_valid() {
        Ok(())
    } else {
        Err(ThemeError::config(format!(
            "policy entry '{}' has an unusable bucket [{}, {}]",
            name, bucket.low, bucket.high
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_table() {
        let policy = SamplingPolicy::standard();

        let surface_alpha = policy.channel(SlotClass::Surface, ChannelClass::Alpha, Variant::Dark);
        assert_eq!(surface_alpha.probability, 0.95);
        assert_eq!(surface_alpha.likely, Bucket::new(0.85, 1.0));

        let alpha = policy.channel(SlotClass::Ordinary, ChannelClass::Alpha, Variant::Light);
        assert_eq!(alpha.unlikely, Bucket::new(0.0, 0.70));

        let dark = policy.channel(SlotClass::Ordinary, ChannelClass::Color, Variant::Dark);
        assert_eq!(dark.likely, Bucket::new(0.0, 0.6));
        let light = policy.channel(SlotClass::Surface, ChannelClass::Color, Variant::Light);
        assert_eq!(light.likely, Bucket::new(0.4, 1.0));

        assert_eq!(policy.surface_joint(Variant::Dark).bucket, Bucket::new(0.0, 0.3));
        assert_eq!(policy.surface_joint(Variant::Light).probability, 0.995);
    }

    #[test]
    fn test_buckets_stay_in_unit_interval() {
        for bucket in SamplingPolicy::standard().buckets() {
            assert!(0.0 <= bucket.low && bucket.low <= bucket.high && bucket.high <= 1.0);
        }
    }

    #[test]
    fn test_validate_rejects_unsampleable_entries() {
        assert!(SamplingPolicy::standard().validate().is_ok());

        let mut reversed = SamplingPolicy::standard();
        reversed.ordinary_alpha.unlikely = Bucket::new(0.7, 0.1);
        assert!(matches!(reversed.validate(), Err(ThemeError::Config { .. })));

        let mut nan = SamplingPolicy::standard();
        nan.light_surface.bucket = Bucket::new(f32::NAN, 1.0);
        assert!(matches!(nan.validate(), Err(ThemeError::Config { .. })));

        let mut odds = SamplingPolicy::standard();
        odds.dark_color.probability = 1.5;
        assert!(matches!(odds.validate(), Err(ThemeError::Config { .. })));

        let mut wide = SamplingPolicy::standard();
        wide.dark_color.likely = Bucket::new(1.5, 2.0);
        assert!(wide.validate().is_ok());
    }

    #[test]
    fn test_bucket_sample_stays_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        let bucket = Bucket::new(0.6, 0.85);
        for _ in 0..10_000 {
            assert!(bucket.contains(bucket.sample(&mut rng)));
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(chance(&mut rng, 1.0));
            assert!(!chance(&mut rng, 0.0));
        }
    }

    #[test]
    fn test_biased_range_frequency() {
        let mut rng = StdRng::seed_from_u64(42);
        let range = BiasedRange::new(0.8, Bucket::new(0.7, 1.0), Bucket::new(0.0, 0.69));
        let hits = (0..5000)
            .filter(|_| range.likely.contains(range.sample(&mut rng)))
            .count();
        let ratio = hits as f64 / 5000.0;
        assert!((0.77..0.83).contains(&ratio), "ratio {ratio}");
    }
}
