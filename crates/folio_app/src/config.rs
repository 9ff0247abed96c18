//! Page configuration
//!
//! Every timing, threshold and breakpoint the components use lives here.
//! The defaults reproduce the portfolio's stock behaviour; a TOML file can
//! override any subset of them:
//!
//! ```toml
//! seed = 42
//!
//! [typing]
//! phrases = ["Rust Engineer", "Systems Tinkerer"]
//!
//! [form]
//! failure_rate = 0.0
//! ```

use std::fs;
use std::path::Path;

use folio_animation::{DriftParams, ParticleBudget, TypingTimings};
use folio_core::{Margin, Millis, ObserverOptions};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Complete page configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed for every random choice on the page; entropy when absent
    pub seed: Option<u64>,
    /// Spacing of animation frames on the virtual clock, ms
    pub frame_interval: Millis,
    pub loader: LoaderConfig,
    pub observer: ObserverConfig,
    pub scroll: ScrollConfig,
    pub typing: TypingConfig,
    pub skills: SkillsConfig,
    pub background: BackgroundConfig,
    pub nav: NavConfig,
    pub form: FormConfig,
    pub floating: DriftParams,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame_interval: 16,
            loader: LoaderConfig::default(),
            observer: ObserverConfig::default(),
            scroll: ScrollConfig::default(),
            typing: TypingConfig::default(),
            skills: SkillsConfig::default(),
            background: BackgroundConfig::default(),
            nav: NavConfig::default(),
            form: FormConfig::default(),
            floating: DriftParams::default(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values no component can work with
    pub fn validate(&self) -> Result<()> {
        if self.frame_interval == 0 {
            return Err(AppError::InvalidValue {
                field: "frame_interval",
                message: "must be at least 1 ms".into(),
            });
        }
        if self.loader.tick_interval == 0 {
            return Err(AppError::InvalidValue {
                field: "loader.tick_interval",
                message: "must be at least 1 ms".into(),
            });
        }
        let timings = &self.typing.timings;
        for (field, delay) in [
            ("typing.timings.type_interval", timings.type_interval),
            ("typing.timings.delete_interval", timings.delete_interval),
        ] {
            if delay == 0 {
                return Err(AppError::InvalidValue {
                    field,
                    message: "must be at least 1 ms".into(),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.form.failure_rate) {
            return Err(AppError::InvalidValue {
                field: "form.failure_rate",
                message: format!("{} is not a probability", self.form.failure_rate),
            });
        }
        for (field, options) in [
            ("observer.reveal", &self.observer.reveal),
            ("observer.scroll_reveal", &self.observer.scroll_reveal),
            ("observer.stagger", &self.observer.stagger),
            ("observer.section_fade", &self.observer.section_fade),
            ("observer.section_activation", &self.observer.section_activation),
        ] {
            if !(0.0..=1.0).contains(&options.threshold) {
                return Err(AppError::InvalidValue {
                    field,
                    message: format!("threshold {} outside 0..=1", options.threshold),
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Page loader progress simulation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub tick_interval: Millis,
    /// Largest random increment per tick, percent
    pub max_step: f32,
    /// Delay between reaching 100% and fading the loader out
    pub fade_delay: Millis,
    /// Delay between the fade and announcing the page ready
    pub ready_delay: Millis,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            tick_interval: 50,
            max_step: 15.0,
            fade_delay: 300,
            ready_delay: 500,
        }
    }
}

/// Intersection thresholds and margins for each viewport effect
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Content reveal (`animate-fadeInUp`) and the skills trigger
    pub reveal: ObserverOptions,
    /// Post-load reveal of `.fade-in` style elements
    pub scroll_reveal: ObserverOptions,
    /// Sentinel of the skills-grid stagger
    pub stagger: ObserverOptions,
    /// Section fade-in
    pub section_fade: ObserverOptions,
    /// Animated background activation
    pub section_activation: ObserverOptions,
    /// Delay between consecutive staggered items, ms
    pub stagger_step: Millis,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        let reveal = ObserverOptions::new(0.1).with_root_margin(Margin::bottom(-50.0));
        Self {
            reveal,
            scroll_reveal: reveal,
            stagger: ObserverOptions::new(0.1),
            section_fade: ObserverOptions::new(0.1),
            section_activation: ObserverOptions::new(0.2)
                .with_root_margin(Margin::bottom(-100.0)),
            stagger_step: 100,
        }
    }
}

/// Scroll coordinator bands and offsets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Scroll-spy throttle interval, ms
    pub spy_interval: Millis,
    /// Delay of the initial and post-click scroll-spy refresh, ms
    pub spy_refresh_delay: Millis,
    /// Extra offset below the navbar for the scroll-spy probe, px
    pub spy_offset: f32,
    /// Navbar height used when the navbar has no measurable height, px
    pub fallback_navbar_height: f32,
    /// Section activated when nothing matches near the top
    pub home_section: String,
    /// Navbar stays transparent below this offset, px
    pub navbar_blend_start: f32,
    /// Navbar becomes fully opaque from this offset, px
    pub navbar_solid_at: f32,
    /// Maximum navbar hue rotation, degrees
    pub max_hue_shift: f32,
    /// Back-to-top button shows beyond this offset, px
    pub back_to_top_after: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            spy_interval: 100,
            spy_refresh_delay: 100,
            spy_offset: 50.0,
            fallback_navbar_height: 80.0,
            home_section: "home".into(),
            navbar_blend_start: 20.0,
            navbar_solid_at: 100.0,
            max_hue_shift: 30.0,
            back_to_top_after: 300.0,
        }
    }
}

/// Typing effect phrases and timings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub timings: TypingTimings,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: [
                "Software Engineer",
                "UX/UI Developer",
                "Web Developer",
                "Frontend Developer",
                "Backend Developer",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            timings: TypingTimings::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    /// Delay between the skills section appearing and the bars starting
    pub start_delay: Millis,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self { start_delay: 500 }
    }
}

/// Particles and pointer parallax
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Viewports narrower than this are low-performance, px
    pub low_performance_width: f32,
    pub low: ParticleBudget,
    pub standard: ParticleBudget,
    /// Pointer parallax debounce, ms
    pub parallax_debounce: Millis,
    /// Minimum gap between pointer particles, ms
    pub pointer_particle_gap: Millis,
    /// Lifetime of a pointer particle, ms
    pub pointer_particle_lifetime: Millis,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            low_performance_width: 768.0,
            low: ParticleBudget::LOW,
            standard: ParticleBudget::STANDARD,
            parallax_debounce: 16,
            pointer_particle_gap: 100,
            pointer_particle_lifetime: 800,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Widening beyond this closes the mobile menu, px
    pub close_breakpoint: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            close_breakpoint: 768.0,
        }
    }
}

/// Contact form submission and messages
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Simulated send latency, ms
    pub submit_latency: Millis,
    /// Probability a simulated send fails
    pub failure_rate: f64,
    /// How long a status message stays up, ms
    pub message_duration: Millis,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_latency: 2000,
            failure_rate: 0.1,
            message_duration: 5000,
        }
    }
}
