//! Browser `localStorage` access for the selected locale.

use common::{Locale, Resolution, LOCALE_STORAGE_KEY};
use leptos::logging;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("local storage refused the write")]
    Rejected,
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn read_locale_token() -> Option<String> {
    local_storage()?.get_item(LOCALE_STORAGE_KEY).ok().flatten()
}

/// Reads the stored token and resolves it. Meant to run once, before the api
/// is constructed.
pub fn stored_locale() -> Locale {
    locale_from_token(read_locale_token().as_deref())
}

pub fn locale_from_token(token: Option<&str>) -> Locale {
    let Resolution { locale, rejected } = Locale::resolve(token);
    if let Some(err) = rejected {
        logging::warn!("{err}, falling back to {locale}");
    }
    locale
}

pub fn persist_locale(locale: &Locale) -> Result<(), StorageError> {
    local_storage()
        .ok_or(StorageError::Unavailable)?
        .set_item(LOCALE_STORAGE_KEY, &locale.token())
        .map_err(|_| StorageError::Rejected)
}
