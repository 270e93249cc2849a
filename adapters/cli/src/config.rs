//! Loads session tunables from an optional TOML file and command-line overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use foundry_core::PlacementPolicy;
use foundry_session::SessionConfig;

/// Values supplied on the command line that take precedence over the file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) obstruction_probability: Option<f64>,
    pub(crate) unchecked_placement: bool,
}

/// Reads the configuration file when one is given, then applies the overrides.
pub(crate) fn load(path: Option<&Path>, overrides: Overrides) -> Result<SessionConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            parse(&text).with_context(|| format!("invalid config file {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    apply_overrides(&mut config, overrides);
    Ok(config)
}

fn parse(text: &str) -> Result<SessionConfig> {
    Ok(toml::from_str(text)?)
}

fn apply_overrides(config: &mut SessionConfig, overrides: Overrides) {
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(probability) = overrides.obstruction_probability {
        config.obstruction_probability = probability;
    }
    if overrides.unchecked_placement {
        config.placement = PlacementPolicy::Unchecked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse("").expect("empty config parses");

        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn partial_file_keeps_unlisted_defaults() {
        let config = parse(
            r#"
seed = 7
obstruction_probability = 0.1

[world]
tile_size = 32

[placement]
mode = "terrain_aware"
claim_occupancy = false

[camera]
speed = 800.0
"#,
        )
        .expect("partial config parses");

        assert_eq!(config.seed, Some(7));
        assert!((config.obstruction_probability - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.world.tile_size, 32);
        assert_eq!(config.world.width, 3200);
        assert_eq!(
            config.placement,
            PlacementPolicy::TerrainAware {
                claim_occupancy: false
            }
        );
        assert!((config.camera.speed - 800.0).abs() < f32::EPSILON);
        assert!((config.camera.max_zoom - 1.5).abs() < f32::EPSILON);
        assert_eq!(config.resources.count_per_tier, 30);
    }

    #[test]
    fn unknown_placement_mode_is_rejected() {
        assert!(parse("[placement]\nmode = \"freeform\"\n").is_err());
    }

    #[test]
    fn overrides_take_precedence_over_file() {
        let mut config = parse("seed = 1\nobstruction_probability = 0.5\n").expect("parses");

        apply_overrides(
            &mut config,
            Overrides {
                seed: Some(99),
                obstruction_probability: Some(0.0),
                unchecked_placement: true,
            },
        );

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.obstruction_probability, 0.0);
        assert_eq!(config.placement, PlacementPolicy::Unchecked);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load(Some(Path::new("/nonexistent/foundry.toml")), Overrides::default())
            .expect_err("missing file must fail");

        assert!(err.to_string().contains("foundry.toml"));
    }
}
