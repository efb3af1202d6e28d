use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueHint};

use crate::data::filter::SiteSelection;

/// Command-line options.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "SpaceX launch records dashboard", long_about = None)]
pub struct Args {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(short, long, default_value = "spacex_launch_dash.csv", value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// Initially selected launch site ("ALL" for every site)
    #[arg(long, default_value = SiteSelection::ALL_VALUE)]
    pub site: String,

    /// Lower bound of the payload slider (kg)
    #[arg(long, default_value_t = 0.0)]
    pub slider_min: f64,

    /// Upper bound of the payload slider (kg)
    #[arg(long, default_value_t = 10000.0)]
    pub slider_max: f64,

    /// Payload slider step (kg)
    #[arg(long, default_value_t = 1000.0)]
    pub slider_step: f64,
}

/// Bounds and step of the payload range slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10000.0,
            step: 1000.0,
        }
    }
}

impl SliderConfig {
    /// Tick marks: both ends plus the quarter points.
    pub fn marks(&self) -> [f64; 5] {
        let span = self.max - self.min;
        [0.0, 0.25, 0.5, 0.75, 1.0].map(|f| self.min + span * f)
    }
}

impl Args {
    /// Check the slider flags and turn them into a [`SliderConfig`].
    pub fn slider(&self) -> Result<SliderConfig> {
        if !(self.slider_min.is_finite() && self.slider_max.is_finite()) {
            bail!("slider bounds must be finite");
        }
        if self.slider_min > self.slider_max {
            bail!(
                "--slider-min ({}) is greater than --slider-max ({})",
                self.slider_min,
                self.slider_max
            );
        }
        if self.slider_step.is_nan() || self.slider_step <= 0.0 {
            bail!("--slider-step must be positive, got {}", self.slider_step);
        }
        Ok(SliderConfig {
            min: self.slider_min,
            max: self.slider_max,
            step: self.slider_step,
        })
    }

    pub fn initial_site(&self) -> SiteSelection {
        SiteSelection::from_value(&self.site)
    }
}
