use core::marker::PhantomData;

use common::Locale;
use leptos::{component, ev, logging::warn, prelude::*, view, IntoView};

use crate::{api::Api, storage::persist_locale};

/// Locales offered by the selector. A bound locale the deployment does not
/// list is offered too, so it can be shown as selected.
fn selector_locales(current: &Locale) -> Vec<Locale> {
    let mut locales = Locale::known().collect::<Vec<_>>();
    if !locales.contains(current) {
        locales.push(current.clone());
    }
    locales
}

/// Country selector. A new choice is persisted and the page reloaded, since
/// the api resolves its routing prefix only once.
#[component]
pub fn LocaleSelect<A: Api>(#[prop(optional)] _ph: PhantomData<A>) -> impl IntoView {
    let current = expect_context::<A>().locale();

    let on_change = move |event: ev::Event| {
        let locale = match event_target_value(&event).parse::<Locale>() {
            Ok(locale) => locale,
            Err(err) => {
                warn!("{err}");
                return;
            }
        };
        if let Err(err) = persist_locale(&locale) {
            warn!("Could not remember {locale}: {err}");
            return;
        }
        if let Err(err) = window().location().reload() {
            warn!("Reload failed: {err:?}");
        }
    };

    let options = selector_locales(&current)
        .into_iter()
        .map(|locale| {
            let selected = locale == current;
            view! {
                <option value=locale.token() selected=selected>
                    {locale.label()}
                </option>
            }
        })
        .collect_view();

    view! {
        <label>
            "Country: " <select on:change=on_change>{options}</select>
        </label>
    }
}

#[cfg(test)]
mod test {
    use common::Locale;

    use super::selector_locales;

    #[test]
    fn offered_locales() {
        let known = Locale::known().collect::<Vec<_>>();
        assert_eq!(selector_locales(&Locale::UnitedStates), known);

        let italian = "ch_it".parse::<Locale>().unwrap();
        let offered = selector_locales(&italian);
        assert_eq!(offered.len(), known.len() + 1);
        assert_eq!(offered.last(), Some(&italian));
    }
}
