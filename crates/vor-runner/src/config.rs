//! Runner configuration from environment variables.
//!
//! | Variable         | Default       |
//! |------------------|---------------|
//! | `VOR_SITE_COUNT` | `10`          |
//! | `VOR_SEED`       | `0`           |
//! | `VOR_MIN`        | `-10,0,-10`   |
//! | `VOR_MAX`        | `10,0,10`     |
//! | `VOR_STEPS`      | `60`          |

use std::str::FromStr;

use eyre::{WrapErr as _, eyre};
use vor_math::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    /// Number of sites to generate.
    pub site_count: usize,
    /// Seed for site placement.
    pub seed: u64,
    /// First box corner; also the first site.
    pub min: Vector3,
    /// Second box corner; also the last site.
    pub max: Vector3,
    /// Host loop iterations; the probe makes one full orbit over all steps.
    pub steps: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            site_count: 10,
            seed: 0,
            min: Vector3::new(-10.0, 0.0, -10.0),
            max: Vector3::new(10.0, 0.0, 10.0),
            steps: 60,
        }
    }
}

impl RunnerConfig {
    /// Read the process environment.
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Missing variables take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let defaults = Self::default();

        let config = Self {
            site_count: parse_var(&lookup, "VOR_SITE_COUNT", defaults.site_count)?,
            seed: parse_var(&lookup, "VOR_SEED", defaults.seed)?,
            min: parse_vector_var(&lookup, "VOR_MIN", defaults.min)?,
            max: parse_vector_var(&lookup, "VOR_MAX", defaults.max)?,
            steps: parse_var(&lookup, "VOR_STEPS", defaults.steps)?,
        };

        if config.steps == 0 {
            return Err(eyre!("VOR_STEPS must be at least 1"));
        }

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> eyre::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("invalid {name}: {raw:?}")),
        None => Ok(default),
    }
}

fn parse_vector_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: Vector3,
) -> eyre::Result<Vector3> {
    match lookup(name) {
        Some(raw) => parse_vector(&raw).wrap_err_with(|| format!("invalid {name}: {raw:?}")),
        None => Ok(default),
    }
}

/// Parse `"x,y,z"`.
fn parse_vector(raw: &str) -> eyre::Result<Vector3> {
    let parts = raw
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        &[x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(eyre!("expected three comma-separated components, got {}", parts.len())),
    }
}
