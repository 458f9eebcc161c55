use serde::{Deserialize, Serialize};

use self::lexicon::LexiconConfig;
use self::network::NetworkConfig;
use self::translation::TranslationConfig;

pub mod lexicon;
pub mod network;
pub mod translation;

#[derive(Default, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub translation: TranslationConfig,
    pub lexicon: LexiconConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            network: NetworkConfig::new(),
            translation: TranslationConfig::new(),
            lexicon: LexiconConfig::default(),
        }
    }
}
