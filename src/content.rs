use dashmap::DashMap;
use rust_embed::Embed;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

use crate::i18n::{Dictionary, Language};

pub static GLOBAL_DICTIONARY_CACHE: LazyLock<DashMap<Language, Arc<Dictionary>>> =
    LazyLock::new(DashMap::new);

#[derive(Embed)]
#[folder = "content"]
pub struct Content;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("Content file not found: {0}")]
    NotFound(String),
    #[error("Content file is not valid UTF-8: {0}")]
    Encoding(String),
    #[error("Couldn't parse content file {file}: {reason}")]
    ParseError { file: String, reason: String },
}

fn read_file(name: &str) -> Result<String, ContentError> {
    let file = Content::get(name).ok_or_else(|| ContentError::NotFound(name.to_string()))?;
    String::from_utf8(file.data.into()).map_err(|_| ContentError::Encoding(name.to_string()))
}

/// Loads and caches the display-string table for `language`.
pub fn load_dictionary(language: Language) -> Result<Arc<Dictionary>, ContentError> {
    let cache = &*GLOBAL_DICTIONARY_CACHE;
    if let Some(dict) = cache.get(&language) {
        return Ok(dict.clone());
    }

    let name = format!("{}.json", language.code());
    let raw = read_file(&name)?;
    let root = serde_json::from_str(&raw).map_err(|e| ContentError::ParseError {
        file: name.clone(),
        reason: e.to_string(),
    })?;
    let dict = Arc::new(Dictionary::new(language, root));
    cache.insert(language, dict.clone());
    log::debug!("loaded dictionary {name}");
    Ok(dict)
}
