//! Ship color and its random walk.
//!
//! The walk is a pure function of the current color and an injected random
//! source, so a seeded RNG reproduces the same sequence of colors.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound for every channel after a walk step.
pub const CHANNEL_MAX: i32 = 100;

/// Magnitude of one walk step.
pub const WALK_STEP: i32 = 10;

/// Three-channel color (red, green, blue).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub [i32; 3]);

impl Color {
    /// Black, the default ship color.
    pub const BLACK: Self = Self([0, 0, 0]);

    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(red: i32, green: i32, blue: i32) -> Self {
        Self([red, green, blue])
    }

    /// The raw channels.
    #[must_use]
    pub const fn channels(self) -> [i32; 3] {
        self.0
    }

    /// Returns this color with every channel nudged by `-WALK_STEP`, `0` or
    /// `+WALK_STEP`, capped at [`CHANNEL_MAX`].
    ///
    /// The step sign is drawn as `round(u * 2) - 1` with `u` uniform in
    /// `[0, 1)`, so the middle outcome is twice as likely as either extreme.
    ///
    /// # Example
    ///
    /// ```
    /// use arcship_core::color::{Color, CHANNEL_MAX};
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let mut a = ChaCha8Rng::seed_from_u64(7);
    /// let mut b = ChaCha8Rng::seed_from_u64(7);
    /// let color = Color::new(100, 50, 0);
    ///
    /// let walked = color.walked(&mut a);
    /// assert_eq!(walked, color.walked(&mut b));
    /// assert!(walked.channels().iter().all(|c| *c <= CHANNEL_MAX));
    /// ```
    #[must_use]
    pub fn walked<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let mut channels = self.0;
        for channel in &mut channels {
            *channel = (*channel + walk_sign(rng) * WALK_STEP).min(CHANNEL_MAX);
        }
        Self(channels)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn walk_sign<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    let draw: f64 = rng.gen::<f64>() * 2.0;
    draw.round() as i32 - 1
}
