use kezuri_core as scratch;
use serde::{Deserialize, Serialize};

const BUNDLED: &str = include_str!("../assets/lottery.toml");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct SoundConfig {
    pub scratch: String,
    pub scratch_volume: f64,
    pub celebration: String,
    pub celebration_volume: f64,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            scratch: "sounds/scratch.mp3".to_string(),
            scratch_volume: 0.5,
            celebration: "sounds/celebration.mp3".to_string(),
            celebration_volume: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct LotteryConfig {
    pub blessings: Vec<String>,
    #[serde(default)]
    pub scratch: scratch::ScratchConfig,
    #[serde(default)]
    pub sound: SoundConfig,
}

impl LotteryConfig {
    const FALLBACK_BLESSING: &'static str = "馬到成功";

    pub(crate) fn parse(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Loads the configuration bundled with the app, falling back to defaults if it is broken.
    pub(crate) fn bundled() -> Self {
        match Self::parse(BUNDLED) {
            Ok(config) if !config.blessings.is_empty() => config,
            Ok(config) => {
                log::warn!("bundled config has no blessings, using fallback");
                Self {
                    blessings: vec![Self::FALLBACK_BLESSING.to_string()],
                    ..config
                }
            }
            Err(err) => {
                log::error!("failed to parse bundled config: {}", err);
                Self::default()
            }
        }
    }

    /// Blessing at `index`, or a random one when no index is forced or it is out of range.
    pub(crate) fn pick_blessing(&self, index: Option<usize>) -> &str {
        let index = index
            .filter(|&index| index < self.blessings.len())
            .unwrap_or_else(|| crate::utils::js_random_index(self.blessings.len()));
        self.blessings
            .get(index)
            .map_or(Self::FALLBACK_BLESSING, String::as_str)
    }
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            blessings: vec![Self::FALLBACK_BLESSING.to_string()],
            scratch: Default::default(),
            sound: Default::default(),
        }
    }
}
